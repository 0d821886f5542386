use crate::models::FontStyle;

/// Determine the CSS weight from a subfamily name.
///
/// Only exact, case-sensitive subfamily names are recognised; anything else
/// (combined names such as "Bold Italic" included) is treated as 400.
pub fn determine_weight(subfamily: &str) -> u16 {
    match subfamily {
        "Thin" | "Hairline" => 100,
        "ExtraLight" | "UltraLight" => 200,
        "Light" => 300,
        "Regular" | "Normal" => 400,
        "Medium" => 500,
        "SemiBold" | "DemiBold" => 600,
        "Bold" => 700,
        "ExtraBold" | "UltraBold" => 800,
        "Black" | "Heavy" => 900,
        _ => 400,
    }
}

/// Check if a font is italic based on its subfamily name
pub fn is_italic_font(subfamily: &str) -> bool {
    subfamily.contains("Italic") || subfamily.contains("Oblique")
}

/// CSS style keyword for a subfamily name
pub fn determine_style(subfamily: &str) -> FontStyle {
    if is_italic_font(subfamily) {
        FontStyle::Italic
    } else {
        FontStyle::Normal
    }
}
