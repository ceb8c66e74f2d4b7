//! OCR engine wrapper over `pure-onnx-ocr`.

use std::path::Path;

use image::DynamicImage;
use tracing::{debug, info};

use crate::error::OcrError;

/// Text recognition seam: the coop converter takes any recognizer, the CLI
/// injects the ONNX-backed one.
pub trait TextRecognizer {
    /// Recognize text in an image, lines joined in reading order.
    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError>;
}

/// Recognizer backed by `pure-onnx-ocr` (pure Rust, no external runtime).
pub struct PureOcrEngine {
    engine: pure_onnx_ocr::engine::OcrEngine,
}

impl PureOcrEngine {
    /// Create an engine from model files in a directory.
    pub fn from_dir(model_dir: &Path) -> Result<Self, OcrError> {
        let det_path = model_dir.join("det.onnx");
        let rec_path = model_dir.join("latin_rec.onnx");
        let dict_path = model_dir.join("latin_dict.txt");

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&det_path)
            .rec_model_path(&rec_path)
            .dictionary_path(&dict_path)
            .build()
            .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        info!("Loaded pure-onnx-ocr engine from {}", model_dir.display());

        Ok(Self { engine })
    }
}

impl TextRecognizer for PureOcrEngine {
    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError> {
        let results = self
            .engine
            .run_from_image(image)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?;

        debug!("pure-onnx-ocr returned {} text regions", results.len());

        // Anchor each region at its first polygon point, then order
        // top-to-bottom in 20px row buckets, left-to-right within a bucket.
        let mut regions: Vec<(f64, f64, String)> = results
            .iter()
            .map(|r| {
                let anchor = r
                    .bounding_box
                    .exterior()
                    .coords()
                    .next()
                    .map(|c| (c.x, c.y))
                    .unwrap_or((0.0, 0.0));
                (anchor.0, anchor.1, r.text.replace("[UNK]", " "))
            })
            .collect();

        regions.sort_by(|a, b| {
            let row_a = (a.1 / 20.0) as i64;
            let row_b = (b.1 / 20.0) as i64;
            if row_a != row_b {
                row_a.cmp(&row_b)
            } else {
                a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal)
            }
        });

        Ok(regions
            .into_iter()
            .map(|(_, _, text)| text)
            .collect::<Vec<_>>()
            .join("\n"))
    }
}
