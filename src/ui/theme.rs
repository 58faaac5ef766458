use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub accent: Color,
    pub orb: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub statusbar_bg: Color,
    pub pill_key_bg: Color,
    pub pill_key_fg: Color,
    pub pill_desc_fg: Color,
}

impl Theme {
    /// `NO_COLOR` in the environment forces the mono theme.
    pub fn from_config(theme_name: &str, accent: &str) -> Self {
        if std::env::var_os("NO_COLOR").is_some() {
            return Self::mono();
        }
        let mut theme = match theme_name.to_lowercase().as_str() {
            "light" => Self::light(),
            "mono" | "monochrome" => Self::mono(),
            _ => Self::dark(),
        };
        if let Some(color) = parse_hex_color(accent) {
            theme.accent = color;
            theme.orb = color;
        }
        theme
    }

    pub fn dark() -> Self {
        Theme {
            name: "dark",
            accent: Color::Cyan,
            orb: Color::Cyan,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            statusbar_bg: Color::DarkGray,
            pill_key_bg: Color::Cyan,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
        }
    }

    pub fn light() -> Self {
        Theme {
            name: "light",
            accent: Color::Rgb(3, 105, 161),
            orb: Color::Rgb(3, 105, 161),
            text_primary: Color::Black,
            text_secondary: Color::DarkGray,
            statusbar_bg: Color::Gray,
            pill_key_bg: Color::Rgb(3, 105, 161),
            pill_key_fg: Color::White,
            pill_desc_fg: Color::Black,
        }
    }

    pub fn mono() -> Self {
        Theme {
            name: "mono",
            accent: Color::Reset,
            orb: Color::Reset,
            text_primary: Color::Reset,
            text_secondary: Color::Reset,
            statusbar_bg: Color::Reset,
            pill_key_bg: Color::Reset,
            pill_key_fg: Color::Reset,
            pill_desc_fg: Color::Reset,
        }
    }
}

fn parse_hex_color(s: &str) -> Option<Color> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if s.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&s[0..2], 16).ok()?;
    let g = u8::from_str_radix(&s[2..4], 16).ok()?;
    let b = u8::from_str_radix(&s[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
