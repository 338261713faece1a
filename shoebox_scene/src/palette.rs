// Fixed semantic colour palette.
//
// Every motif colours its vertices by interpolating between two of these
// named stops, sometimes pulled toward the neutral `structure` colour to
// desaturate. The stops are grouped by meaning: warm (heat gain), cool (heat
// loss), and neutral (building and scaffolding).
//
// Colours are illustrative only; nothing here is derived from temperatures.

/// Linear RGB colour, each channel in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb(pub [f32; 3]);

impl Rgb {
    pub const BLACK: Rgb = Rgb([0.0, 0.0, 0.0]);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self([r, g, b])
    }

    /// Linear interpolation toward `other`; `t` is clamped to [0, 1].
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        let [a0, a1, a2] = self.0;
        let [b0, b1, b2] = other.0;
        // Weighted form so both endpoints are reproduced exactly.
        Rgb([a0 * u + b0 * t, a1 * u + b1 * t, a2 * u + b2 * t])
    }

    /// Multiply every channel by `k`.
    pub fn scale(self, k: f32) -> Rgb {
        let [r, g, b] = self.0;
        Rgb([r * k, g * k, b * k])
    }

    /// Pull this colour toward the neutral structure tone.
    pub fn desaturate(self, amount: f32) -> Rgb {
        self.lerp(STRUCTURE.rgb, amount)
    }
}

/// A named palette entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    pub name: &'static str,
    pub rgb: Rgb,
}

pub const WARM_HOT: ColorStop = ColorStop {
    name: "warmHot",
    rgb: Rgb::new(1.0, 0.353, 0.122),
};
pub const WARM_MID: ColorStop = ColorStop {
    name: "warmMid",
    rgb: Rgb::new(1.0, 0.604, 0.235),
};
pub const WARM_SOFT: ColorStop = ColorStop {
    name: "warmSoft",
    rgb: Rgb::new(1.0, 0.816, 0.541),
};
pub const COOL_ICE: ColorStop = ColorStop {
    name: "coolIce",
    rgb: Rgb::new(0.749, 0.937, 1.0),
};
pub const COOL_MID: ColorStop = ColorStop {
    name: "coolMid",
    rgb: Rgb::new(0.310, 0.702, 1.0),
};
pub const COOL_DEEP: ColorStop = ColorStop {
    name: "coolDeep",
    rgb: Rgb::new(0.122, 0.373, 1.0),
};
pub const STRUCTURE: ColorStop = ColorStop {
    name: "structure",
    rgb: Rgb::new(0.604, 0.655, 0.722),
};
pub const GRID_LINE: ColorStop = ColorStop {
    name: "gridLine",
    rgb: Rgb::new(0.227, 0.275, 0.337),
};
pub const GLOW: ColorStop = ColorStop {
    name: "glow",
    rgb: Rgb::new(1.0, 0.886, 0.722),
};

/// All stops, warm first, then cool, then neutral.
pub const PALETTE: [ColorStop; 9] = [
    WARM_HOT, WARM_MID, WARM_SOFT, COOL_ICE, COOL_MID, COOL_DEEP, STRUCTURE, GRID_LINE, GLOW,
];

/// Look up a stop by its semantic name.
pub fn stop(name: &str) -> Option<ColorStop> {
    PALETTE.iter().copied().find(|s| s.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name() {
        assert_eq!(stop("warmHot"), Some(WARM_HOT));
        assert_eq!(stop("coolIce"), Some(COOL_ICE));
        assert_eq!(stop("magenta"), None);
    }

    #[test]
    fn names_are_unique() {
        for (i, a) in PALETTE.iter().enumerate() {
            for b in &PALETTE[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn channels_in_unit_range() {
        for s in PALETTE {
            for c in s.rgb.0 {
                assert!((0.0..=1.0).contains(&c), "{} channel {c}", s.name);
            }
        }
    }

    #[test]
    fn lerp_endpoints_and_clamp() {
        let a = WARM_HOT.rgb;
        let b = COOL_DEEP.rgb;
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 4.0), b);
        assert_eq!(a.lerp(b, -1.0), a);
    }

    #[test]
    fn desaturate_fully_gives_structure() {
        assert_eq!(WARM_HOT.rgb.desaturate(1.0), STRUCTURE.rgb);
    }
}
