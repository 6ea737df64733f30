use serde::Serialize;

/// Wire format consumed by the parent service: a single JSON object on
/// stdout with exactly these two camelCase fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoReport {
    pub class_name: String,
    pub score: f32,
}

impl PhotoReport {
    pub fn detected(class_name: impl Into<String>, score: f32) -> Self {
        Self {
            class_name: class_name.into(),
            score,
        }
    }

    /// Sentinel emitted for every failure mode and for "nothing detected";
    /// the parent does not distinguish the two
    pub fn empty() -> Self {
        Self {
            class_name: String::new(),
            score: -1.0,
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_wire_format() {
        let json = PhotoReport::empty().to_json().unwrap();
        assert_eq!(json, r#"{"className":"","score":-1.0}"#);
    }

    #[test]
    fn test_detected_report_wire_format() {
        let json = PhotoReport::detected("person", 0.875).to_json().unwrap();
        assert_eq!(json, r#"{"className":"person","score":0.875}"#);
    }

    #[test]
    fn test_round_trips_through_serde_json() {
        let report = PhotoReport::detected("car", 0.5);
        let value: serde_json::Value =
            serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(value["className"], "car");
        assert_eq!(value["score"], 0.5);
    }
}
