use ndarray::ArrayViewD;

#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub class_id: usize,
    pub confidence: f32,
}

pub struct PostProcessor {
    pub confidence_threshold: f32,
}

impl PostProcessor {
    pub fn new(confidence_threshold: f32) -> Self {
        Self {
            confidence_threshold,
        }
    }

    /// Scan YOLO prediction rows and keep the single highest-confidence one.
    ///
    /// Rows are [cx, cy, w, h, objectness, score_0..score_nc]. Row confidence
    /// is objectness scaled by the best class score. Only one detection is
    /// ever reported, so the usual NMS stage has nothing to suppress and is
    /// skipped entirely.
    pub fn top_detection(&self, preds: &ArrayViewD<f32>) -> anyhow::Result<Option<Detection>> {
        let shape = preds.shape();
        if shape.len() != 3 || shape[0] != 1 || shape[2] <= 5 {
            anyhow::bail!(
                "Unexpected prediction shape {:?}, want [1, rows, 5 + classes]",
                shape
            );
        }

        let rows = shape[1];
        let num_classes = shape[2] - 5;

        let mut best: Option<Detection> = None;

        for i in 0..rows {
            let objectness = preds[[0, i, 4]];

            // Candidate gate: rows without an object never reach scoring
            if objectness < self.confidence_threshold {
                continue;
            }

            // Argmax over the per-class scores
            let mut max_score = f32::NEG_INFINITY;
            let mut class_id = 0usize;
            for c in 0..num_classes {
                let score = preds[[0, i, 5 + c]];
                if score > max_score {
                    max_score = score;
                    class_id = c;
                }
            }

            let confidence = objectness * max_score;
            if confidence < self.confidence_threshold {
                continue;
            }

            if best.as_ref().map_or(true, |b| confidence > b.confidence) {
                best = Some(Detection {
                    class_id,
                    confidence,
                });
            }
        }

        Ok(best)
    }
}
