use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Likert scale colours
// ---------------------------------------------------------------------------

/// `n` colours with hues spread evenly from `from_hue` to `to_hue` (degrees).
pub fn hue_ramp(n: usize, from_hue: f32, to_hue: f32) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    let step = if n > 1 { (to_hue - from_hue) / (n - 1) as f32 } else { 0.0 };
    (0..n)
        .map(|i| {
            let hue = from_hue + step * i as f32;
            let hsl = Hsl::new(hue, 0.65, 0.5);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// One colour per Likert answer: red for 1 through green for 5.
pub fn likert_colors() -> Vec<Color32> {
    hue_ramp(5, 0.0, 120.0)
}
