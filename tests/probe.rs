use parhelion::{
    atlas_dimensions, cell_of, decode_radiance, encode_radiance, face_at, face_size_for,
    pixel_region, reproject, rgbe_to_linear, validate_faces, CubeFace, DecodeError, FaceImage,
    LayoutError, ProbeImage, CROSS_COLS, CROSS_ROWS,
};

fn radiance_header(width: usize, height: usize) -> Vec<u8> {
    let mut bytes = Vec::new();

    bytes.extend_from_slice(b"#?RADIANCE\n");
    bytes.extend_from_slice(b"FORMAT=32-bit_rle_rgbe\n");
    bytes.extend_from_slice(b"\n");
    bytes.extend_from_slice(format!("-Y {} +X {}\n", height, width).as_bytes());

    bytes
}

#[test]
fn decodes_known_rgbe_samples() {
    let texels: [[u8; 4]; 8] = [
        [128, 64, 32, 136],
        [128, 0, 0, 129],
        [0, 0, 0, 0],
        [255, 255, 255, 128],
        [64, 128, 255, 120],
        [1, 2, 3, 136],
        [200, 100, 50, 132],
        [16, 16, 16, 144],
    ];

    let mut bytes = radiance_header(4, 2);

    for texel in &texels {
        bytes.extend_from_slice(texel);
    }

    let image = decode_radiance(&bytes).unwrap();

    assert_eq!(image.width(), 4);
    assert_eq!(image.height(), 2);
    assert_eq!(image.channels(), 3);

    for (index, &texel) in texels.iter().enumerate() {
        let expected = rgbe_to_linear(texel);
        let actual = image.texel(index % 4, index / 4);

        for channel in 0..3 {
            assert!(
                (actual[channel] - expected[channel]).abs() < 1e-4,
                "texel {} channel {}: {} vs {}",
                index,
                channel,
                actual[channel],
                expected[channel]
            );
        }
    }

    // spot-check the RGBE formula against hand-computed values
    assert_eq!(image.texel(1, 0), [1.0, 0.0, 0.0]);
    assert_eq!(image.texel(2, 0), [0.0, 0.0, 0.0]);
    assert_eq!(image.texel(0, 0), [128.0, 64.0, 32.0]);
}

#[test]
fn encode_decode_round_trips_within_mantissa_precision() {
    let (width, height) = (16, 4);
    let mut pixels = Vec::new();

    for y in 0..height {
        for x in 0..width {
            pixels.push((x as f32 + 1.0) * 0.37);
            pixels.push((y as f32 + 1.0) * 2.11);
            pixels.push((x as f32 + y as f32) * 0.004 + 0.001);
        }
    }

    let bytes = encode_radiance(width, height, &pixels).unwrap();
    let image = decode_radiance(&bytes).unwrap();

    assert_eq!(image.width(), width);
    assert_eq!(image.height(), height);

    for (decoded, original) in image.pixels().chunks_exact(3).zip(pixels.chunks_exact(3)) {
        let max = original[0].max(original[1]).max(original[2]);
        let tolerance = max / 128.0 + 1e-6;

        for channel in 0..3 {
            assert!(
                (decoded[channel] - original[channel]).abs() <= tolerance,
                "{} vs {} (tolerance {})",
                decoded[channel],
                original[channel],
                tolerance
            );
        }
    }
}

#[test]
fn decodes_new_style_rle_scanlines() {
    let (width, height) = (8, 1);
    let mut bytes = radiance_header(width, height);

    // one run of eight per component
    bytes.extend_from_slice(&[2, 2, 0, 8]);
    bytes.extend_from_slice(&[136, 128]);
    bytes.extend_from_slice(&[136, 64]);
    bytes.extend_from_slice(&[136, 32]);
    bytes.extend_from_slice(&[136, 136]);

    let image = decode_radiance(&bytes).unwrap();

    for x in 0..width {
        assert_eq!(image.texel(x, 0), [128.0, 64.0, 32.0]);
    }
}

#[test]
fn decodes_old_style_rle_scanlines() {
    let (width, height) = (4, 1);
    let mut bytes = radiance_header(width, height);

    bytes.extend_from_slice(&[128, 64, 32, 136]);
    bytes.extend_from_slice(&[1, 1, 1, 3]); // repeat previous pixel 3 times

    let image = decode_radiance(&bytes).unwrap();

    for x in 0..width {
        assert_eq!(image.texel(x, 0), [128.0, 64.0, 32.0]);
    }
}

#[test]
fn rejects_malformed_streams() {
    assert!(matches!(
        decode_radiance(b"P6 not radiance\n"),
        Err(DecodeError::BadSignature)
    ));

    let mut truncated = radiance_header(4, 2);
    truncated.extend_from_slice(&[128, 64, 32, 136]); // 7 texels missing

    assert!(matches!(
        decode_radiance(&truncated),
        Err(DecodeError::Truncated)
    ));

    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"#?RADIANCE\n");
    bytes.extend_from_slice(b"FORMAT=32-bit_rle_xyze\n\n-Y 1 +X 1\n");
    bytes.extend_from_slice(&[0, 0, 0, 0]);

    assert!(matches!(
        decode_radiance(&bytes),
        Err(DecodeError::UnsupportedFormat(_))
    ));

    let mut flipped = Vec::new();
    flipped.extend_from_slice(b"#?RADIANCE\n");
    flipped.extend_from_slice(b"FORMAT=32-bit_rle_rgbe\n\n+Y 1 +X 1\n");
    flipped.extend_from_slice(&[0, 0, 0, 0]);

    assert!(matches!(
        decode_radiance(&flipped),
        Err(DecodeError::UnsupportedOrientation(_))
    ));
}

/// Builds an equirectangular probe whose texels hold a smooth function of
/// the texel direction, so reprojection accuracy is directly measurable.
fn synthetic_probe(width: usize, height: usize) -> ProbeImage {
    let mut pixels = Vec::with_capacity(width * height * 3);

    for y in 0..height {
        let theta = (y as f32 + 0.5) / height as f32 * std::f32::consts::PI;

        for x in 0..width {
            let azimuth = ((x as f32 + 0.5) / width as f32 - 0.5) * 2.0 * std::f32::consts::PI;

            let dir = [
                theta.sin() * azimuth.cos(),
                theta.cos(),
                theta.sin() * azimuth.sin(),
            ];

            pixels.push((dir[0] + 1.0) / 2.0);
            pixels.push((dir[1] + 1.0) / 2.0);
            pixels.push((dir[2] + 1.0) / 2.0);
        }
    }

    ProbeImage::from_pixels(width, height, 3, pixels).unwrap()
}

fn assert_texels_close(a: [f32; 3], b: [f32; 3], epsilon: f32) {
    for channel in 0..3 {
        assert!(
            (a[channel] - b[channel]).abs() < epsilon,
            "{:?} vs {:?}",
            a,
            b
        );
    }
}

#[test]
fn reprojected_faces_match_face_centers() {
    let probe = synthetic_probe(256, 128);
    let faces = reproject(&probe, 64);

    assert_eq!(validate_faces(&faces).unwrap(), 64);

    for face in &faces {
        let center = face.texel(31, 31);

        let [dx, dy, dz] = face.face.direction(0.0, 0.0);
        let expected = [(dx + 1.0) / 2.0, (dy + 1.0) / 2.0, (dz + 1.0) / 2.0];

        // half a texel away from the exact center
        assert_texels_close(center, expected, 0.05);
    }
}

#[test]
fn reprojected_faces_tile_seamlessly() {
    let size = 64;
    let probe = synthetic_probe(256, 128);
    let faces = reproject(&probe, size);

    let face = |which: CubeFace| faces.iter().find(|f| f.face == which).unwrap();

    let front = face(CubeFace::PositiveZ);
    let right = face(CubeFace::PositiveX);
    let back = face(CubeFace::NegativeZ);
    let left = face(CubeFace::NegativeX);
    let top = face(CubeFace::PositiveY);
    let bottom = face(CubeFace::NegativeY);

    let epsilon = 0.06;

    for k in 0..size {
        // the middle row of the cross wraps all the way around
        assert_texels_close(front.texel(size - 1, k), right.texel(0, k), epsilon);
        assert_texels_close(right.texel(size - 1, k), back.texel(0, k), epsilon);
        assert_texels_close(back.texel(size - 1, k), left.texel(0, k), epsilon);
        assert_texels_close(left.texel(size - 1, k), front.texel(0, k), epsilon);

        // vertical seams against the polar faces
        assert_texels_close(top.texel(k, size - 1), front.texel(k, 0), epsilon);
        assert_texels_close(bottom.texel(k, 0), front.texel(k, size - 1), epsilon);
    }
}

#[test]
fn cross_layout_is_fixed() {
    assert_eq!(cell_of(CubeFace::PositiveZ), (1, 1));
    assert_eq!(cell_of(CubeFace::PositiveY), (1, 0));
    assert_eq!(cell_of(CubeFace::NegativeY), (1, 2));
    assert_eq!(cell_of(CubeFace::NegativeX), (0, 1));
    assert_eq!(cell_of(CubeFace::PositiveX), (2, 1));
    assert_eq!(cell_of(CubeFace::NegativeZ), (3, 1));

    assert_eq!(pixel_region(CubeFace::PositiveZ, 64), (64, 64, 128, 128));
    assert_eq!(pixel_region(CubeFace::PositiveY, 64), (64, 0, 128, 64));
    assert_eq!(pixel_region(CubeFace::NegativeZ, 64), (192, 64, 256, 128));

    assert_eq!(atlas_dimensions(64), (256, 192));

    let mut populated = 0;

    for row in 0..CROSS_ROWS {
        for col in 0..CROSS_COLS {
            if face_at(col, row).is_some() {
                populated += 1;
            }
        }
    }

    assert_eq!(populated, 6);
}

#[test]
fn face_sets_must_be_square_and_uniform() {
    let square = |size: usize| FaceImage {
        face: CubeFace::PositiveX,
        size,
        pixels: vec![0.0; size * size * 3],
    };

    let mut faces: Vec<FaceImage> = CubeFace::ALL
        .iter()
        .map(|&face| FaceImage { face, ..square(8) })
        .collect();

    assert_eq!(validate_faces(&faces).unwrap(), 8);

    faces[3] = FaceImage {
        face: CubeFace::NegativeY,
        ..square(16)
    };

    assert!(matches!(
        validate_faces(&faces),
        Err(LayoutError::NotUniform { .. })
    ));

    faces[3] = FaceImage {
        face: CubeFace::NegativeY,
        size: 8,
        pixels: vec![0.0; 8 * 7 * 3],
    };

    assert!(matches!(validate_faces(&faces), Err(LayoutError::NotSquare)));

    assert!(matches!(
        validate_faces(&faces[..5]),
        Err(LayoutError::FaceCount(5))
    ));
}

#[test]
fn face_size_tracks_probe_resolution() {
    assert_eq!(face_size_for(128, 4096), 64);
    assert_eq!(face_size_for(100, 4096), 32);
    assert_eq!(face_size_for(4096, 512), 512);
    assert_eq!(face_size_for(2, 4096), 1);
}
