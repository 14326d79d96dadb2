use crate::engine::rng::UnitSource;

pub fn viewport_center(viewport: (u32, u32)) -> (f64, f64) {
    (viewport.0 as f64 / 2.0, viewport.1 as f64 / 2.0)
}

pub fn rect_center(left: f64, top: f64, width: f64, height: f64) -> (f64, f64) {
    (left + width / 2.0, top + height / 2.0)
}

/// Uniform point inside the viewport, x drawn before y.
pub fn random_point<R: UnitSource + ?Sized>(viewport: (u32, u32), rng: &mut R) -> (f64, f64) {
    let x = rng.next_unit() * viewport.0 as f64;
    let y = rng.next_unit() * viewport.1 as f64;
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rng::FixedUnits;

    #[test]
    fn center_of_odd_viewport() {
        assert_eq!(viewport_center((801, 600)), (400.5, 300.0));
    }

    #[test]
    fn rect_center_offsets_by_origin() {
        assert_eq!(rect_center(10.0, 20.0, 100.0, 50.0), (60.0, 45.0));
    }

    #[test]
    fn random_point_stays_inside() {
        let mut rng = fastrand::Rng::with_seed(3);
        for _ in 0..200 {
            let (x, y) = random_point((320, 200), &mut rng);
            assert!((0.0..320.0).contains(&x));
            assert!((0.0..200.0).contains(&y));
        }
        let mut fixed = FixedUnits::new(vec![0.5, 0.25]);
        assert_eq!(random_point((100, 100), &mut fixed), (50.0, 25.0));
    }
}
