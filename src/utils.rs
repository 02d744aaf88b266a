use web_sys::console;

pub fn set_panic_hook() {
    // When the `console_error_panic_hook` feature is enabled, we can call the
    // `set_panic_hook` function at least once during initialization, and then
    // we will get better error messages if our code ever panics.
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

pub fn log(msg: &str) {
    console::log_1(&msg.into());
}

pub fn warn(msg: &str) {
    console::warn_1(&msg.into());
}

// Scope timer, shows up in the browser's console timeline
pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }

    // Only times when profiling is switched on
    pub fn maybe(enabled: bool, name: &'a str) -> Option<Timer<'a>> {
        if enabled {
            Some(Timer::new(name))
        } else {
            None
        }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}
