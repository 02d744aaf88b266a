// Simple color struct, created from an unsigned 32 representing RRGGBBAA
// or parsed from the CSS forms a page uses for its accent color

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    // Accent the page script falls back to when no theme color is defined
    pub const DEFAULT_ACCENT: Color = Color::from_u32(0x2563_ebff);

    pub const fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 0xff }
    }

    // Accepts "#rgb", "#rrggbb", "#rrggbbaa" and "rgb(r, g, b)" / "rgba(r, g, b, a)"
    pub fn parse(css: &str) -> Result<Color, String> {
        let css = css.trim();
        if let Some(hex) = css.strip_prefix('#') {
            Color::parse_hex(hex)
        } else if let Some(body) = css
            .strip_prefix("rgba(")
            .or_else(|| css.strip_prefix("rgb("))
        {
            let body = body
                .strip_suffix(')')
                .ok_or_else(|| format!("unterminated color function: {}", css))?;
            Color::parse_rgb_body(body)
        } else {
            Err(format!("unsupported color: {:?}", css))
        }
    }

    fn parse_hex(hex: &str) -> Result<Color, String> {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("invalid hex color: #{}", hex));
        }
        let digits: Vec<u8> = hex
            .chars()
            .filter_map(|c| c.to_digit(16))
            .map(|d| d as u8)
            .collect();
        match digits.len() {
            3 => Ok(Color::rgb(digits[0] * 17, digits[1] * 17, digits[2] * 17)),
            6 | 8 => {
                let bytes: Vec<u8> = digits.chunks(2).map(|p| p[0] << 4 | p[1]).collect();
                let a = bytes.get(3).copied().unwrap_or(0xff);
                Ok(Color {
                    r: bytes[0],
                    g: bytes[1],
                    b: bytes[2],
                    a,
                })
            }
            n => Err(format!("hex color must have 3, 6 or 8 digits, got {}", n)),
        }
    }

    fn parse_rgb_body(body: &str) -> Result<Color, String> {
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        if parts.len() != 3 && parts.len() != 4 {
            return Err(format!("expected 3 or 4 color components, got {}", parts.len()));
        }
        let channel = |s: &str| -> Result<u8, String> {
            s.parse::<f64>()
                .map(|v| v.round().max(0.0).min(255.0) as u8)
                .map_err(|_| format!("invalid color component: {:?}", s))
        };
        let a = match parts.get(3) {
            Some(s) => s
                .parse::<f64>()
                .map(|v| (v.max(0.0).min(1.0) * 255.0).round() as u8)
                .map_err(|_| format!("invalid alpha component: {:?}", s))?,
            None => 0xff,
        };
        Ok(Color {
            r: channel(parts[0])?,
            g: channel(parts[1])?,
            b: channel(parts[2])?,
            a,
        })
    }

    // Serialized for canvas fill/stroke styles; transparency is applied
    // separately through globalAlpha
    pub fn to_css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}
