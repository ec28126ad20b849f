//! Main QR code decoder - wires everything together

use crate::capability::layout::FunctionLayout;
use crate::capability::tables::BlockLayout;
use crate::decoder::bitstream::extract_codewords;
use crate::decoder::format::{FormatInfo, read_version};
use crate::decoder::unmask::unmask;
use crate::detector::finder::FinderDetector;
use crate::detector::transform::{FinderTriple, candidate_transforms, group_finders, sample_grid};
use crate::error::DecodeError;
use crate::models::{BitMatrix, Point, QRCode, Version};
use crate::utils::geometry::PerspectiveTransform;

mod payload;

/// Main QR decoder: binarized frame -> finder triples -> sampled grid -> payload
pub struct QrDecoder;

impl QrDecoder {
    /// Decode the first symbol found in a binarized frame
    pub fn decode_binary(matrix: &BitMatrix) -> Result<QRCode, DecodeError> {
        let finders = FinderDetector::detect(matrix);
        if finders.len() < 3 {
            return Err(DecodeError::NotFound);
        }
        let triples = group_finders(&finders);
        tracing::debug!(
            finders = finders.len(),
            triples = triples.len(),
            "grouped finder patterns"
        );

        let mut furthest = DecodeError::NotFound;
        for (attempt, triple) in triples.iter().enumerate() {
            match Self::decode_triple(matrix, triple) {
                Ok(qr) => return Ok(qr),
                Err(e) => {
                    tracing::trace!(attempt, error = %e, "finder triple rejected");
                    furthest = furthest.max(e);
                }
            }
        }
        Err(furthest)
    }

    /// Decode the symbol spanned by one finder triple
    pub fn decode_triple(matrix: &BitMatrix, triple: &FinderTriple) -> Result<QRCode, DecodeError> {
        let estimated = triple.estimate_version().ok_or(DecodeError::NotFound)?;
        let mut versions = vec![estimated];
        if estimated.number() >= 7
            && let Some(read) = Self::read_version_near(matrix, triple, estimated)
            && read != estimated
        {
            tracing::debug!(
                estimated = estimated.number(),
                read = read.number(),
                "version information overrides finder spacing"
            );
            versions.insert(0, read);
        }

        let mut furthest = DecodeError::NotFound;
        for version in versions {
            for transform in candidate_transforms(matrix, triple, version) {
                match Self::decode_sampled(matrix, triple, &transform, version) {
                    Ok(qr) => return Ok(qr),
                    Err(e) => furthest = furthest.max(e),
                }
            }
        }
        Err(furthest)
    }

    /// Decode a module grid (one sample per module, no quiet zone). A
    /// mirrored grid is read through its transpose.
    pub fn decode_grid(grid: &BitMatrix) -> Result<QRCode, DecodeError> {
        if grid.width() != grid.height() {
            return Err(DecodeError::NotFound);
        }
        let version = Version::from_dimension(grid.width()).ok_or(DecodeError::NotFound)?;
        Self::decode_upright(grid, version).or_else(|upright| {
            Self::decode_upright(&grid.transposed(), version).map_err(|mirrored| upright.max(mirrored))
        })
    }

    fn decode_sampled(
        matrix: &BitMatrix,
        triple: &FinderTriple,
        transform: &PerspectiveTransform,
        version: Version,
    ) -> Result<QRCode, DecodeError> {
        let dim = version.size() as f32;
        let grid = sample_grid(matrix, transform, version.size());
        let corner = transform
            .transform(&Point::new(dim - 3.5, dim - 3.5))
            .unwrap_or_else(|| triple.parallelogram_corner());
        let (tl, tr, bl) = (
            triple.top_left.center,
            triple.top_right.center,
            triple.bottom_left.center,
        );

        match Self::decode_upright(&grid, version) {
            Ok(mut qr) => {
                qr.position = [tl, tr, bl, corner];
                Ok(qr)
            }
            Err(upright) => {
                let mut qr = Self::decode_upright(&grid.transposed(), version)
                    .map_err(|mirrored| upright.max(mirrored))?;
                tracing::debug!("decoded mirrored symbol");
                qr.position = [tl, bl, tr, corner];
                Ok(qr)
            }
        }
    }

    /// Sample with the estimated version and read the version blocks
    fn read_version_near(
        matrix: &BitMatrix,
        triple: &FinderTriple,
        estimated: Version,
    ) -> Option<Version> {
        candidate_transforms(matrix, triple, estimated)
            .iter()
            .find_map(|t| read_version(&sample_grid(matrix, t, estimated.size())))
    }

    /// Try each distinct format reading, nearest first
    fn decode_upright(grid: &BitMatrix, version: Version) -> Result<QRCode, DecodeError> {
        let mut furthest = DecodeError::UnreadableFormatInfo;
        for format in FormatInfo::candidates(grid) {
            match Self::decode_with_format(grid, version, format) {
                Ok(qr) => return Ok(qr),
                Err(e) => furthest = furthest.max(e),
            }
        }
        Err(furthest)
    }

    fn decode_with_format(
        grid: &BitMatrix,
        version: Version,
        format: FormatInfo,
    ) -> Result<QRCode, DecodeError> {
        let layout = FunctionLayout::new(version);
        let positions = layout.data_positions();
        let mut unmasked = grid.clone();
        unmask(&mut unmasked, layout.function_mask(), format.mask_pattern);

        let blocks = BlockLayout::new(version, format.ec_level);
        let codewords = extract_codewords(&unmasked, &positions, blocks.total_codewords());
        let data = payload::deinterleave_and_correct(&codewords, &blocks)?;
        let bytes = payload::parse_segments(&data, version)?;
        let content = payload::bytes_to_text(&bytes);

        tracing::debug!(
            version = version.number(),
            ec_level = %format.ec_level,
            mask = format.mask_pattern.bits(),
            len = bytes.len(),
            "decoded symbol"
        );
        Ok(QRCode::new(
            bytes,
            content,
            version,
            format.ec_level,
            format.mask_pattern,
        ))
    }
}
