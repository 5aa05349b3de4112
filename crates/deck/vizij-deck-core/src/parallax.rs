//! Parallax layers: cached speed factors and per-frame offset math.

/// One decorative element shifted independently of the slide track.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallaxLayer {
    pub speed: f64,
}

impl ParallaxLayer {
    /// Translation (px) for an element whose vertical midpoint on screen is
    /// `midpoint_y`, given the animated deck offset.
    #[inline]
    pub fn offset(&self, current_offset: f64, midpoint_y: f64, factor: f64) -> f64 {
        (current_offset - midpoint_y) * self.speed * factor
    }
}

/// Speed cache rebuilt from element attributes at startup and on resize.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParallaxCache {
    layers: Vec<ParallaxLayer>,
}

impl ParallaxCache {
    /// Build the cache from raw attribute values, one per element in
    /// document order.
    pub fn from_attributes<S: AsRef<str>>(attrs: &[Option<S>], default_speed: f64) -> Self {
        let layers = attrs
            .iter()
            .map(|raw| ParallaxLayer {
                speed: parse_speed(raw.as_ref().map(|s| s.as_ref()), default_speed),
            })
            .collect();
        Self { layers }
    }

    pub fn layers(&self) -> &[ParallaxLayer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

/// Parse a speed attribute the way the browser's `parseFloat` reads a
/// leading number. Missing, unparsable, zero and non-finite values yield
/// `default_speed`.
pub fn parse_speed(raw: Option<&str>, default_speed: f64) -> f64 {
    match raw.and_then(leading_float) {
        Some(v) if v.is_finite() && v != 0.0 => v,
        _ => default_speed,
    }
}

/// Longest prefix of `s` (after leading whitespace) that reads as a decimal
/// float: optional sign, digits with an optional fraction, optional exponent.
fn leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    s[..end].parse().ok()
}
