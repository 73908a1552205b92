/// Illuminance estimate from the raw red, green and blue channels of the color sensor.
///
/// Channel weights follow the sensor vendor's application note, the clear channel is not used.
pub fn calculate_lux(r: u16, g: u16, b: u16) -> f32 {
    (-0.32466 * r as f32) + (1.57837 * g as f32) + (-0.73191 * b as f32)
}

#[cfg(test)]
mod test {
    use crate::lux::calculate_lux;

    #[test]
    fn dark_is_zero() {
        assert_eq!(calculate_lux(0, 0, 0), 0.0);
    }

    #[test]
    fn green_dominates() {
        assert!((calculate_lux(0, 1000, 0) - 1578.37).abs() < 0.01);
        assert!((calculate_lux(1000, 1000, 1000) - 521.8).abs() < 0.01);
    }

    #[test]
    fn red_and_blue_only_can_go_negative() {
        assert!(calculate_lux(500, 0, 500) < 0.0);
    }
}
