//! Fitting the device into a viewport

/// Unscaled device width, in points
pub const DEVICE_WIDTH: f32 = 320.0;

/// Unscaled device height, in points
pub const DEVICE_HEIGHT: f32 = 540.0;

/// Horizontal viewport padding (both sides together)
const PAD_X: f32 = 32.0;

/// Vertical viewport padding (top and bottom together)
const PAD_Y: f32 = 48.0;

/// Viewports narrower than this are treated as mobile
const MOBILE_WIDTH: f32 = 768.0;

/// Rough device class, guessed from the viewport width
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DeviceClass {
    Mobile,
    Desktop,
}

impl DeviceClass {
    /// Classifies a viewport by its width
    pub fn from_width(width: f32) -> Self {
        if width < MOBILE_WIDTH {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    /// Largest scale factor for this class
    pub fn max_scale(&self) -> f32 {
        match self {
            DeviceClass::Mobile => 1.2,
            DeviceClass::Desktop => 1.5,
        }
    }

    /// Smallest scale factor for this class
    pub fn min_scale(&self) -> f32 {
        match self {
            DeviceClass::Mobile => 0.6,
            DeviceClass::Desktop => 0.5,
        }
    }
}

/// Computes the scale factor that fits the device into a viewport
pub fn scale(width: f32, height: f32) -> f32 {
    let class = DeviceClass::from_width(width);
    let sx = (width - PAD_X) / DEVICE_WIDTH;
    let sy = (height - PAD_Y) / DEVICE_HEIGHT;
    sx.min(sy).min(class.max_scale()).max(class.min_scale())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn desktop_cap() {
        assert_eq!(scale(1920.0, 1080.0), 1.5);
    }

    #[test]
    fn smaller_axis_wins() {
        // Height-bound: (588 - 48) / 540 = 1.0
        assert_eq!(scale(1280.0, 588.0), 1.0);
    }

    #[test]
    fn mobile() {
        assert_eq!(DeviceClass::from_width(375.0), DeviceClass::Mobile);
        // Width-bound: (352 - 32) / 320 = 1.0
        assert_eq!(scale(352.0, 800.0), 1.0);
        assert_eq!(scale(700.0, 2000.0), 1.2);
        assert_eq!(scale(100.0, 100.0), 0.6);
    }

    #[test]
    fn desktop_floor() {
        assert_eq!(scale(800.0, 100.0), 0.5);
    }
}
