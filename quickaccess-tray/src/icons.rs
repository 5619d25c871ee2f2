//! Tray icon resources.
//!
//! This module provides the embedded folder icon for the tray application.
//! The icon is generated as raw RGBA data for cross-platform compatibility.

use anyhow::{Context, Result};
use tray_icon::Icon;

/// Icon size in pixels.
const ICON_SIZE: u32 = 32;

/// Folder color matching the app branding (orange-red).
const FOLDER_RED: u8 = 0xFF;
const FOLDER_GREEN: u8 = 0x42;
const FOLDER_BLUE: u8 = 0x21;

/// Create the folder tray icon.
pub fn create_folder_icon() -> Result<Icon> {
    let rgba = create_folder_icon_rgba();
    Icon::from_rgba(rgba, ICON_SIZE, ICON_SIZE).context("Failed to create tray icon")
}

/// Generate RGBA data for a simple folder glyph.
///
/// The icon is a 32x32 image with:
/// - A tab along the top-left (the folder label)
/// - A rounded rectangle below it (the folder body)
fn create_folder_icon_rgba() -> Vec<u8> {
    let size = ICON_SIZE as usize;
    let mut rgba = vec![0u8; size * size * 4];

    for y in 0..size {
        for x in 0..size {
            let pixel_index = (y * size + x) * 4;

            // Folder tab (top-left, slanted right edge)
            let in_tab = (2..=14).contains(&x) && (6..=10).contains(&y) && x + y <= 22;

            // Folder body
            let in_body = (2..=29).contains(&x) && (10..=26).contains(&y);

            if in_tab || in_body {
                rgba[pixel_index] = FOLDER_RED;
                rgba[pixel_index + 1] = FOLDER_GREEN;
                rgba[pixel_index + 2] = FOLDER_BLUE;
                rgba[pixel_index + 3] = 0xFF;
            } else {
                // Transparent
                rgba[pixel_index] = 0;
                rgba[pixel_index + 1] = 0;
                rgba[pixel_index + 2] = 0;
                rgba[pixel_index + 3] = 0;
            }
        }
    }

    rgba
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_size() {
        let rgba = create_folder_icon_rgba();
        let expected_size = (ICON_SIZE * ICON_SIZE * 4) as usize;
        assert_eq!(rgba.len(), expected_size);
    }

    #[test]
    fn test_create_folder_icon() {
        let result = create_folder_icon();
        assert!(result.is_ok());
    }

    #[test]
    fn test_icon_has_transparency() {
        let rgba = create_folder_icon_rgba();
        // Check that some pixels are transparent (alpha = 0)
        let has_transparent = rgba.chunks(4).any(|pixel| pixel[3] == 0);
        assert!(has_transparent, "Icon should have transparent pixels");

        // Check that some pixels are opaque (alpha = 255)
        let has_opaque = rgba.chunks(4).any(|pixel| pixel[3] == 255);
        assert!(has_opaque, "Icon should have opaque pixels");
    }
}
