//! Cosmetic HUD readouts derived from scroll progress, plus the
//! background-layer selection. None of this is physically modeled.

use crate::constants::{BACKGROUND_LAYER_COUNT, MAX_ALTITUDE_FT, MAX_MACH};

#[inline]
pub fn altitude_ft(progress: f32) -> f32 {
    progress.clamp(0.0, 1.0) * MAX_ALTITUDE_FT
}

#[inline]
pub fn mach(progress: f32) -> f32 {
    progress.clamp(0.0, 1.0) * MAX_MACH
}

/// Which parallax background layer is active for a section.
#[inline]
pub fn background_layer(section: usize) -> usize {
    section % BACKGROUND_LAYER_COUNT
}

/// "ALT 12,450 FT"
pub fn format_altitude(progress: f32) -> String {
    format!("ALT {} FT", group_thousands(altitude_ft(progress).round() as u32))
}

/// "MACH 1.12"
pub fn format_mach(progress: f32) -> String {
    format!("MACH {:.2}", mach(progress))
}

fn group_thousands(mut n: u32) -> String {
    let mut groups = Vec::new();
    loop {
        let rem = n % 1000;
        n /= 1000;
        if n == 0 {
            groups.push(rem.to_string());
            break;
        }
        groups.push(format!("{rem:03}"));
    }
    groups.reverse();
    groups.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_digits() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(950), "950");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(59_000), "59,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn readouts_scale_with_progress_and_clamp() {
        assert_eq!(altitude_ft(0.0), 0.0);
        assert_eq!(altitude_ft(1.0), MAX_ALTITUDE_FT);
        assert!((altitude_ft(0.5) - MAX_ALTITUDE_FT * 0.5).abs() < 1e-3);
        assert_eq!(altitude_ft(1.7), MAX_ALTITUDE_FT);
        assert_eq!(mach(0.0), 0.0);
        assert_eq!(mach(1.0), MAX_MACH);
        assert_eq!(mach(-0.3), 0.0);
        assert_eq!(format_mach(1.0), "MACH 2.25");
        assert_eq!(format_altitude(1.0), "ALT 59,000 FT");
    }

    #[test]
    fn background_layers_cycle_through_sections() {
        assert_eq!(background_layer(0), 0);
        assert_eq!(background_layer(3), 3);
        assert_eq!(background_layer(4), 0);
        assert_eq!(background_layer(6), 2);
    }
}
