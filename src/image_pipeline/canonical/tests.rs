#[cfg(test)]
mod tests {
    use crate::image_pipeline::canonical::{
        canonicalize, CanonicalVector, Canonicalizer, Polarity, RecenterMode, CANONICAL_LEN,
        CENTER_OF_MASS_TARGET,
    };
    use crate::image_pipeline::stroke::RawImage;

    const INK: u8 = 0;

    fn fill_rect(image: &mut RawImage, left: u32, top: u32, width: u32, height: u32) {
        for y in top..top + height {
            for x in left..left + width {
                image.put(x, y, INK);
            }
        }
    }

    fn ring(side: u32) -> RawImage {
        let mut image = RawImage::blank(side, side);
        let center = side as f64 / 2.0;
        let outer = side as f64 * 100.0 / 280.0;
        let inner = side as f64 * 70.0 / 280.0;
        for y in 0..side {
            for x in 0..side {
                let d = (x as f64 + 0.5 - center).hypot(y as f64 + 0.5 - center);
                if d >= inner && d < outer {
                    image.put(x, y, INK);
                }
            }
        }
        image
    }

    fn seven(side: u32) -> RawImage {
        let mut image = RawImage::blank(side, side);
        let s = side as f64;
        fill_rect(&mut image, side / 4, side / 5, side / 2, side / 14);

        let half_stroke = s / 28.0;
        for y in side / 5..side * 4 / 5 {
            let t = (y as f64 - s / 5.0) / (s * 3.0 / 5.0);
            let cx = 0.75 * s - t * 0.3 * s;
            for x in (cx - half_stroke) as u32..(cx + half_stroke) as u32 {
                image.put(x, y, INK);
            }
        }
        image
    }

    fn noise(width: u32, height: u32, seed: u64) -> RawImage {
        let mut state = seed;
        let data = (0..width * height)
            .map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                (state >> 56) as u8
            })
            .collect();
        RawImage::new(width, height, data).unwrap()
    }

    fn inverted(image: &RawImage) -> RawImage {
        let data = image.data().iter().map(|&v| 255 - v).collect();
        RawImage::new(image.width(), image.height(), data).unwrap()
    }

    fn cosine(a: &CanonicalVector, b: &CanonicalVector) -> f64 {
        let dot: f64 = a.as_slice().iter().zip(b.as_slice()).map(|(&x, &y)| x as f64 * y as f64).sum();
        let norm = |v: &CanonicalVector| v.as_slice().iter().map(|&x| (x as f64).powi(2)).sum::<f64>().sqrt();
        dot / (norm(a) * norm(b))
    }

    fn column_mass(vector: &CanonicalVector, columns: std::ops::Range<u32>) -> f32 {
        columns
            .flat_map(|x| (0..28).map(move |y| (x, y)))
            .map(|(x, y)| vector.get(x, y).unwrap())
            .sum()
    }

    fn assert_well_formed(vector: &CanonicalVector) {
        assert_eq!(vector.as_slice().len(), CANONICAL_LEN);
        assert!(vector.as_slice().iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_blank_canvas_yields_zero_vector() {
        let vector = canonicalize(RawImage::blank(280, 280));

        assert_eq!(vector.as_slice(), &[0.0; CANONICAL_LEN][..]);
        assert!(vector.is_blank());
        assert_eq!(vector.centroid(), None);
    }

    #[test]
    fn test_blank_of_any_dimensions() {
        for (width, height) in [(0, 0), (0, 9), (9, 0), (1, 1), (3, 7), (640, 480)] {
            let vector = canonicalize(RawImage::blank(width, height));

            assert_well_formed(&vector);
            assert!(vector.is_blank(), "{width}x{height} should canonicalize to zeros");
        }
    }

    #[test]
    fn test_output_length_and_range() {
        let inputs = vec![
            ring(280),
            seven(280),
            seven(57),
            noise(280, 280, 1),
            noise(13, 401, 7),
            RawImage::filled(50, 30, INK),
        ];

        for input in inputs {
            let vector = canonicalize(input);

            assert_well_formed(&vector);
            assert!(!vector.is_blank());
        }
    }

    #[test]
    fn test_centered_square() {
        let mut image = RawImage::blank(280, 280);
        fill_rect(&mut image, 90, 90, 100, 100);

        let vector = canonicalize(image);

        let lit = vector.as_slice().iter().filter(|&&v| v > 0.0).count();
        assert!((300..=500).contains(&lit), "lit pixels: {lit}");

        let (x_c, y_c) = vector.centroid().unwrap();
        assert!((x_c - CENTER_OF_MASS_TARGET).abs() <= 1.0);
        assert!((y_c - CENTER_OF_MASS_TARGET).abs() <= 1.0);
    }

    #[test]
    fn test_single_pixel_lands_on_center() {
        let mut image = RawImage::blank(280, 280);
        image.put(140, 140, INK);

        let vector = canonicalize(image);

        assert_well_formed(&vector);
        let (x_c, y_c) = vector.centroid().unwrap();
        assert!((x_c - CENTER_OF_MASS_TARGET).abs() <= 1.0, "x_c = {x_c}");
        assert!((y_c - CENTER_OF_MASS_TARGET).abs() <= 1.0, "y_c = {y_c}");
    }

    #[test]
    fn test_canonical_input_is_fixed_point() {
        let mut image = RawImage::blank(280, 280);
        fill_rect(&mut image, 110, 80, 60, 120);

        let first = canonicalize(image);
        let second = canonicalize(first.to_stroke_image());

        let max_diff = first
            .as_slice()
            .iter()
            .zip(second.as_slice())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0f32, f32::max);
        assert!(max_diff <= 0.02, "max difference {max_diff}");
    }

    #[test]
    fn test_scale_invariance() {
        let pairs = [(ring(280), ring(140)), (seven(280), seven(140))];

        for (large, small) in pairs {
            let similarity = cosine(&canonicalize(large), &canonicalize(small));

            assert!(similarity > 0.9, "cosine similarity {similarity}");
        }
    }

    #[test]
    fn test_deterministic() {
        let image = seven(200);

        assert_eq!(canonicalize(image.clone()), canonicalize(image));
    }

    #[test]
    fn test_extreme_aspect_ratio() {
        let mut image = RawImage::blank(40, 600);
        fill_rect(&mut image, 20, 50, 1, 500);

        let vector = canonicalize(image);

        assert_well_formed(&vector);
        assert!(!vector.is_blank());
    }

    #[test]
    fn test_light_on_dark_skips_inversion() {
        let drawn = seven(200);
        let dataset_polarity = inverted(&drawn);

        let expected = canonicalize(drawn);
        let actual = Canonicalizer::new(Polarity::LightOnDark, RecenterMode::Wrap)
            .canonicalize(dataset_polarity);

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_auto_polarity() {
        let auto = Canonicalizer::new(Polarity::Auto, RecenterMode::Wrap);
        let light_on_dark = Canonicalizer::new(Polarity::LightOnDark, RecenterMode::Wrap);
        let drawn = ring(140);
        let dataset_polarity = inverted(&drawn);

        assert_eq!(auto.canonicalize(drawn.clone()), canonicalize(drawn));
        assert_eq!(
            auto.canonicalize(dataset_polarity.clone()),
            light_on_dark.canonicalize(dataset_polarity)
        );
    }

    #[test]
    fn test_recentering_wraps_unless_clipped() {
        // Heavy bar on the left with a long thin tail to the right: the
        // centroid sits far left, so the shift pushes the tail past the edge.
        let mut image = RawImage::blank(200, 200);
        fill_rect(&mut image, 0, 0, 40, 200);
        fill_rect(&mut image, 40, 98, 160, 4);

        let wrapped = Canonicalizer::new(Polarity::DarkOnLight, RecenterMode::Wrap)
            .canonicalize(image.clone());
        let clipped = Canonicalizer::new(Polarity::DarkOnLight, RecenterMode::Clip)
            .canonicalize(image);

        assert_well_formed(&wrapped);
        assert_well_formed(&clipped);
        assert!(column_mass(&wrapped, 0..3) > 0.0);
        assert_eq!(column_mass(&clipped, 0..3), 0.0);
        assert!(clipped.mass() < wrapped.mass());
    }

    #[test]
    fn test_concurrent_calls_agree() {
        let image = ring(280);
        let expected = canonicalize(image.clone());

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let image = image.clone();
                    scope.spawn(move || canonicalize(image))
                })
                .collect();

            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
