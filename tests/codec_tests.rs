//! End-to-end encoder/decoder behaviour: rendered round trips, geometry,
//! capacity limits, error correction limits and mask choice.

use wifi_qr::capability::layout::FunctionLayout;
use wifi_qr::encoder::mask::penalty_score;
use wifi_qr::utils::geometry::PerspectiveTransform;
use wifi_qr::{
    BitMatrix, DecodeError, ECLevel, EncodeError, Encoder, MaskPattern, Mode, Point, RasterImage,
    RenderOptions, Version, decode, decode_matrix, decode_str, encode, encode_bytes, render,
};

fn gray_frame(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> u8) -> RasterImage {
    let data = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .map(|(x, y)| f(x, y))
        .collect();
    RasterImage::from_gray(width, height, data).unwrap()
}

/// Rotate a grayscale frame by 90 degrees clockwise `turns` times
fn rotate(frame: &RasterImage, turns: usize) -> RasterImage {
    let mut current = frame.clone();
    for _ in 0..turns % 4 {
        let (w, h) = (current.width(), current.height());
        let src = current.data().to_vec();
        current = gray_frame(h, w, |x, y| src[(h - 1 - x) * w + y]);
    }
    current
}

/// Toggle every bit of the listed codewords
fn corrupt_codewords(grid: &BitMatrix, version: Version, indices: &[usize]) -> BitMatrix {
    let positions = FunctionLayout::new(version).data_positions();
    let mut damaged = grid.clone();
    for &k in indices {
        for &(x, y) in &positions[k * 8..k * 8 + 8] {
            damaged.toggle(x, y);
        }
    }
    damaged
}

#[test]
fn test_render_decode_roundtrip() {
    let payloads = [
        "HELLO WORLD",
        "31415926535897932384626433832795",
        "https://example.org/a/b?c=d&e=f",
        "naïve café ✓",
    ];
    for level in ECLevel::ALL {
        for payload in payloads {
            let symbol = encode(payload, level).unwrap();
            let frame = render(&symbol, RenderOptions::with_scale(4));
            let qr = decode(&frame).unwrap();
            assert_eq!(qr.content, payload, "level {level}");
            assert_eq!(qr.data, payload.as_bytes());
            assert_eq!(qr.version, symbol.version());
            assert_eq!(qr.error_correction, level);
        }
    }
}

#[test]
fn test_large_symbol_roundtrip() {
    let payload: String = (0..400).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
    let symbol = encode(&payload, ECLevel::M).unwrap();
    assert!(symbol.version().number() >= 7);
    let frame = render(&symbol, RenderOptions::with_scale(3));
    assert_eq!(decode_str(&frame).unwrap(), payload);
}

#[test]
fn test_rotated_frames() {
    let symbol = encode("turn turn turn", ECLevel::Q).unwrap();
    let frame = render(&symbol, RenderOptions::with_scale(4));
    for turns in 1..4 {
        let rotated = rotate(&frame, turns);
        assert_eq!(decode_str(&rotated).unwrap(), "turn turn turn", "{turns} turns");
    }
}

#[test]
fn test_sheared_frame() {
    let symbol = encode("slanted capture", ECLevel::M).unwrap();
    let flat = render(&symbol, RenderOptions::with_scale(6));
    let side = flat.width();
    let pad = side / 10;
    let width = side + pad;
    let sheared = gray_frame(width, side, |x, y| {
        let sx = x as f32 - 0.08 * y as f32;
        if sx < 0.0 || sx as usize >= side {
            255
        } else {
            flat.data()[y * side + sx as usize]
        }
    });
    assert_eq!(decode_str(&sheared).unwrap(), "slanted capture");
}

#[test]
fn test_uneven_lighting() {
    let payload = "WIFI:T:WPA;S:Back Room;P:lamp-in-the-corner;H:false;;";
    let flat = render(&encode(payload, ECLevel::M).unwrap(), RenderOptions::with_scale(5));
    let side = flat.width();
    // Brightness falls from 100% on the right to 35% on the left
    let lit = gray_frame(side, side, |x, y| {
        let gain = 35 + 65 * x / (side - 1);
        (flat.data()[y * side + x] as usize * gain / 100) as u8
    });
    assert_eq!(decode_str(&lit).unwrap(), payload);
}

#[test]
fn test_keystone_frame() {
    let v3 = Version::new(3).unwrap();
    let symbol = Encoder::new(ECLevel::M)
        .with_version_range(v3, v3)
        .encode("tilted towards the camera")
        .unwrap();
    let flat = render(&symbol, RenderOptions::with_scale(6));
    let side = flat.width() as f32;
    let pad = 12.0;
    // Top edge 10% shorter than the bottom edge
    let inset = 0.05 * side;
    let quad = [
        Point::new(pad + inset, pad),
        Point::new(pad + side - inset, pad),
        Point::new(pad, pad + side),
        Point::new(pad + side, pad + side),
    ];
    let square = [
        Point::new(0.0, 0.0),
        Point::new(side, 0.0),
        Point::new(0.0, side),
        Point::new(side, side),
    ];
    let to_flat = PerspectiveTransform::from_points(&quad, &square).unwrap();
    let out = (side + 2.0 * pad) as usize;
    let n = flat.width();
    let tilted = gray_frame(out, out, |x, y| {
        match to_flat.transform(&Point::new(x as f32 + 0.5, y as f32 + 0.5)) {
            Some(p) if p.x >= 0.0 && p.y >= 0.0 && (p.x as usize) < n && (p.y as usize) < n => {
                flat.data()[p.y as usize * n + p.x as usize]
            }
            _ => 255,
        }
    });
    assert_eq!(decode_str(&tilted).unwrap(), "tilted towards the camera");
}

#[test]
fn test_mirrored_frame() {
    let symbol = encode("looking glass", ECLevel::L).unwrap();
    let frame = render(&symbol, RenderOptions::with_scale(4));
    let side = frame.width();
    let mirrored = gray_frame(side, side, |x, y| frame.data()[y * side + (side - 1 - x)]);
    assert_eq!(decode_str(&mirrored).unwrap(), "looking glass");
}

#[test]
fn test_encoding_is_deterministic() {
    for level in ECLevel::ALL {
        let a = encode("WIFI:T:WPA;S:Lab;P:pa55;H:false;;", level).unwrap();
        let b = encode("WIFI:T:WPA;S:Lab;P:pa55;H:false;;", level).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn test_capacity_boundary() {
    let v1 = Version::MIN;
    let in_v1 = Encoder::new(ECLevel::M).with_version_range(v1, v1);
    // Version 1-M holds 14 bytes in byte mode
    assert!(in_v1.encode_bytes(&[b'x'; 14]).is_ok());
    assert!(matches!(
        in_v1.encode_bytes(&[b'x'; 15]),
        Err(EncodeError::PayloadTooLarge { len: 15, mode: Mode::Byte, .. })
    ));

    // Version 40-L holds 2953 bytes
    assert_eq!(encode_bytes(&[0xA5; 2953], ECLevel::L).unwrap().version(), Version::MAX);
    assert!(matches!(
        encode_bytes(&[0xA5; 2954], ECLevel::L),
        Err(EncodeError::PayloadTooLarge { len: 2954, .. })
    ));
}

#[test]
fn test_error_correction_threshold() {
    // Version 1-M: one block with 10 EC codewords
    let symbol = Encoder::new(ECLevel::M).encode("ERROR LIMIT").unwrap();
    assert_eq!(symbol.version(), Version::MIN);

    let five = corrupt_codewords(symbol.modules(), Version::MIN, &[0, 3, 7, 12, 20]);
    assert_eq!(decode_matrix(&five).unwrap().content, "ERROR LIMIT");

    let six = corrupt_codewords(symbol.modules(), Version::MIN, &[0, 3, 7, 12, 20, 25]);
    assert_eq!(decode_matrix(&six).unwrap_err(), DecodeError::UncorrectableBlock);
}

#[test]
fn test_selected_mask_minimizes_penalty() {
    let payload = "WIFI:T:WEP;S:Mask Test;P:0123456789;H:true;;";
    for level in [ECLevel::L, ECLevel::H] {
        let chosen = encode(payload, level).unwrap();
        let best = MaskPattern::ALL
            .iter()
            .map(|&mask| {
                let forced = Encoder::new(level).with_mask(mask).encode(payload).unwrap();
                (penalty_score(forced.modules()), mask)
            })
            .min()
            .unwrap();
        assert_eq!(chosen.mask(), best.1);
        assert_eq!(penalty_score(chosen.modules()), best.0);
    }
}

#[test]
fn test_frames_without_symbols() {
    let blank = gray_frame(160, 120, |_, _| 255);
    let gradient = gray_frame(200, 150, |x, _| (x * 255 / 199) as u8);
    let checker = gray_frame(160, 160, |x, y| if (x / 4 + y / 4) % 2 == 0 { 0 } else { 255 });
    for frame in [blank, gradient, checker] {
        assert_eq!(decode(&frame).unwrap_err(), DecodeError::NotFound);
    }
}

#[test]
fn test_noise_never_yields_a_payload() {
    let mut state = 0x2545_F491u32;
    let noise = gray_frame(120, 120, |_, _| {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        (state >> 24) as u8
    });
    assert!(decode(&noise).is_err());
}
