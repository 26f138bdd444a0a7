use ratatui::style::Color;

/// Palette shared by every widget. Swapped wholesale when the theme toggles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub muted: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
}

pub const DARK: Theme = Theme {
    primary: Color::from_u32(0x0090caf9),
    secondary: Color::from_u32(0x00f48fb1),
    background: Color::from_u32(0x00121212),
    surface: Color::from_u32(0x001e1e1e),
    text: Color::from_u32(0x00ffffff),
    muted: Color::from_u32(0x00b3b3b3),
    success: Color::from_u32(0x0066bb6a),
    error: Color::from_u32(0x00f44336),
    warning: Color::from_u32(0x00ffa726),
};

pub const LIGHT: Theme = Theme {
    primary: Color::from_u32(0x001976d2),
    secondary: Color::from_u32(0x00dc004e),
    background: Color::from_u32(0x00fafafa),
    surface: Color::from_u32(0x00ffffff),
    text: Color::from_u32(0x00212121),
    muted: Color::from_u32(0x00757575),
    success: Color::from_u32(0x002e7d32),
    error: Color::from_u32(0x00d32f2f),
    warning: Color::from_u32(0x00ed6c02),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn theme(self) -> &'static Theme {
        match self {
            Self::Dark => &DARK,
            Self::Light => &LIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_twice_returns_to_start() {
        let mode = ThemeMode::default();

        assert_eq!(mode, ThemeMode::Dark);
        assert_eq!(mode.toggled(), ThemeMode::Light);
        assert_eq!(mode.toggled().toggled(), ThemeMode::Dark);
    }

    #[test]
    fn modes_resolve_to_distinct_palettes() {
        assert_ne!(ThemeMode::Dark.theme(), ThemeMode::Light.theme());
    }
}
