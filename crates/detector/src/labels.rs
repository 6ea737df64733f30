/// Class-id-to-name table for the loaded model.
///
/// Ultralytics exporters embed the training-time names map in the ONNX
/// custom metadata under the `names` key, formatted as a Python dict repr:
/// `{0: 'person', 1: 'bicycle', ...}`. Newer exporters sometimes emit JSON
/// with double quotes instead; both spellings are accepted.
#[derive(Debug, Clone)]
pub struct ClassNames {
    names: Vec<String>,
}

impl ClassNames {
    #[cfg(feature = "ort-backend")]
    pub fn from_session(session: &ort::session::Session) -> anyhow::Result<Self> {
        let metadata = session.metadata()?;
        let raw = metadata
            .custom("names")
            .ok_or_else(|| anyhow::anyhow!("Model metadata carries no 'names' table"))?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let body = raw
            .trim()
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .ok_or_else(|| anyhow::anyhow!("Names table is not a brace-delimited map: {raw:?}"))?;

        let mut entries: Vec<(usize, String)> = Vec::new();
        for part in body.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let (id, name) = part
                .split_once(':')
                .ok_or_else(|| anyhow::anyhow!("Malformed names entry: {part:?}"))?;
            let id: usize = id
                .trim()
                .trim_matches(|c| c == '\'' || c == '"')
                .parse()
                .map_err(|_| anyhow::anyhow!("Non-numeric class id in names entry: {part:?}"))?;
            let name = name.trim().trim_matches(|c| c == '\'' || c == '"').to_string();
            entries.push((id, name));
        }

        if entries.is_empty() {
            anyhow::bail!("Names table holds no class entries");
        }

        let size = entries.iter().map(|(id, _)| id + 1).max().unwrap_or(0);
        let mut names = vec![String::new(); size];
        for (id, name) in entries {
            names[id] = name;
        }

        Ok(Self { names })
    }

    /// Build a table directly from an ordered name list
    pub fn from_vec(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Name for a class id; None when the id is unknown to the model
    pub fn get(&self, class_id: usize) -> Option<&str> {
        match self.names.get(class_id) {
            Some(name) if !name.is_empty() => Some(name),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
