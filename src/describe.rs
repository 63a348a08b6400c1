//! Human-readable color names built from HSL buckets, e.g. "Dark Vibrant Blue".

use crate::conversion::HslColor;

/// Below this saturation a color is named as a gray
const GRAY_SATURATION: u8 = 10;

/// Upper bounds (exclusive) of the lightness buckets; the last bucket is open-ended
const LIGHTNESS_BUCKETS: [(u8, &str); 4] = [(20, "Very Dark"), (40, "Dark"), (60, "Medium"), (80, "Light")];
const LIGHTEST: &str = "Very Light";

const SATURATION_BUCKETS: [(u8, &str); 2] = [(20, "Muted"), (60, "Moderate")];
const MOST_SATURATED: &str = "Vibrant";

/// 30 degree sectors starting at 15 degrees; Red wraps around 0
const HUE_SECTORS: [(u16, &str); 11] = [
    (45, "Orange"),
    (75, "Yellow"),
    (105, "Lime"),
    (135, "Green"),
    (165, "Teal"),
    (195, "Cyan"),
    (225, "Azure"),
    (255, "Blue"),
    (285, "Violet"),
    (315, "Magenta"),
    (345, "Pink"),
];

fn bucket<T: PartialOrd + Copy>(value: T, buckets: &[(T, &'static str)], last: &'static str) -> &'static str {
    buckets
        .iter()
        .find(|(upper, _)| value < *upper)
        .map_or(last, |&(_, name)| name)
}

pub fn lightness_name(lightness: u8) -> &'static str {
    bucket(lightness, &LIGHTNESS_BUCKETS, LIGHTEST)
}

pub fn saturation_name(saturation: u8) -> &'static str {
    bucket(saturation, &SATURATION_BUCKETS, MOST_SATURATED)
}

pub fn hue_name(hue: u16) -> &'static str {
    let hue = hue % 360;
    if !(15..345).contains(&hue) {
        return "Red";
    }
    bucket(hue, &HUE_SECTORS, "Red")
}

/// Name a color as `"{lightness} {saturation} {hue}"`, or `"{lightness} Gray"`
/// when saturation is under 10%.
pub fn describe(hsl: HslColor) -> String {
    let lightness = lightness_name(hsl.lightness);
    if hsl.saturation < GRAY_SATURATION {
        return format!("{lightness} Gray");
    }
    format!("{lightness} {} {}", saturation_name(hsl.saturation), hue_name(hsl.hue))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::rgb_to_hsl;

    #[test]
    fn test_primaries() {
        assert_eq!(describe(rgb_to_hsl(255, 0, 0)), "Medium Vibrant Red");
        assert_eq!(describe(rgb_to_hsl(0, 0, 255)), "Medium Vibrant Blue");
        assert_eq!(describe(rgb_to_hsl(0, 128, 0)), "Dark Vibrant Green");
        // hue 254 sits one degree below the Violet sector
        assert_eq!(describe(rgb_to_hsl(29, 0, 120)), "Dark Vibrant Blue");
    }

    #[test]
    fn test_grays_ignore_hue() {
        assert_eq!(describe(rgb_to_hsl(128, 128, 128)), "Medium Gray");
        assert_eq!(describe(HslColor::new(200, 9, 90)), "Very Light Gray");
        assert_eq!(describe(HslColor::new(0, 0, 0)), "Very Dark Gray");
    }

    #[test]
    fn test_bucket_edges() {
        assert_eq!(lightness_name(19), "Very Dark");
        assert_eq!(lightness_name(20), "Dark");
        assert_eq!(lightness_name(79), "Light");
        assert_eq!(lightness_name(80), "Very Light");

        assert_eq!(saturation_name(10), "Muted");
        assert_eq!(saturation_name(20), "Moderate");
        assert_eq!(saturation_name(59), "Moderate");
        assert_eq!(saturation_name(60), "Vibrant");
    }

    #[test]
    fn test_hue_sectors() {
        assert_eq!(hue_name(0), "Red");
        assert_eq!(hue_name(14), "Red");
        assert_eq!(hue_name(15), "Orange");
        assert_eq!(hue_name(60), "Yellow");
        assert_eq!(hue_name(180), "Cyan");
        assert_eq!(hue_name(240), "Blue");
        assert_eq!(hue_name(300), "Magenta");
        assert_eq!(hue_name(315), "Pink");
        assert_eq!(hue_name(344), "Pink");
        assert_eq!(hue_name(345), "Red");
        assert_eq!(hue_name(359), "Red");
    }

    #[test]
    fn test_describe_is_pure() {
        let hsl = HslColor::new(210, 45, 33);
        assert_eq!(describe(hsl), "Dark Moderate Azure");
        assert_eq!(describe(hsl), describe(hsl));
    }
}
