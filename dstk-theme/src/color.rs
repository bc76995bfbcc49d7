//! Hex color helpers used when token references carry an alpha modifier.

/// An 8-bit RGBA color parsed from a hex literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba {
    /// Format as a CSS `rgba()` function with the given alpha (0.0..=1.0).
    pub fn to_css_with_alpha(&self, alpha: f32) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

/// Parse a `#rrggbb` or `#rrggbbaa` literal.
pub fn parse_hex_color(hex: &str) -> Result<Rgba, String> {
    let digits = hex
        .strip_prefix('#')
        .ok_or_else(|| format!("'{}' is not a hex color", hex))?;
    let channel = |range: std::ops::Range<usize>| {
        digits
            .get(range)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .ok_or_else(|| format!("'{}' is not a valid hex color", hex))
    };

    match digits.len() {
        6 => Ok(Rgba {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
            a: 255,
        }),
        8 => Ok(Rgba {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
            a: channel(6..8)?,
        }),
        _ => Err("Hex color must be 6 or 8 characters".to_string()),
    }
}

/// Apply an opacity modifier to a hex color literal, producing `rgba(...)`.
///
/// The modifier replaces any alpha already present in the literal.
pub fn with_alpha(literal: &str, alpha: f32) -> Result<String, String> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(format!("alpha {} is outside 0.0..=1.0", alpha));
    }
    Ok(parse_hex_color(literal)?.to_css_with_alpha(alpha))
}
