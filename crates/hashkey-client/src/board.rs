//! Holds the keys currently on display.

use std::io::{self, Write};

use hashkey::{KeyRecord, KeySet, KeyType};

use crate::client::{KeyClient, Source};

/// Display state for one client. Passed explicitly to whatever renders it.
#[derive(Debug, Default)]
pub struct KeyBoard {
    keys: Vec<KeyRecord>,
    current_batch: Option<String>,
    source: Option<Source>,
}

impl KeyBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the board contents with a freshly loaded set.
    pub async fn load(&mut self, client: &KeyClient, batch: Option<&str>) -> hashkey::Result<Source> {
        let loaded = client.load(batch).await?;
        self.show(loaded.set, loaded.source);
        Ok(loaded.source)
    }

    pub fn show(&mut self, set: KeySet, source: Source) {
        self.current_batch = Some(set.batch_id.clone());
        self.keys = set.into_records();
        self.source = Some(source);
    }

    pub fn keys(&self) -> &[KeyRecord] {
        &self.keys
    }

    pub fn current_batch(&self) -> Option<&str> {
        self.current_batch.as_deref()
    }

    pub fn source(&self) -> Option<Source> {
        self.source
    }

    pub fn find(&self, key: &str) -> Option<&KeyRecord> {
        self.keys.iter().find(|r| r.key == key)
    }

    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(batch) = self.current_batch.as_deref() else {
            return writeln!(out, "No keys loaded.");
        };
        let source = self.source.map(|s| s.to_string()).unwrap_or_default();
        writeln!(out, "Batch {batch} ({source})")?;
        for record in &self.keys {
            let tag = match record.key_type {
                KeyType::Free12h => "[12H]",
                KeyType::Free24h => "[24H]",
            };
            writeln!(out, "{tag} {}  {}", record.key, record.duration)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashkey::KeyGenerator;

    #[test]
    fn test_empty_board() {
        let board = KeyBoard::new();
        let mut out = Vec::new();
        board.render(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No keys loaded.\n");
        assert!(board.current_batch().is_none());
    }

    #[test]
    fn test_show_and_render() {
        let set = KeyGenerator::new().generate_batch("BATCH42").unwrap();
        let first = set.keys_12h[0].key.clone();
        let last = set.keys_24h[2].key.clone();

        let mut board = KeyBoard::new();
        board.show(set, Source::Remote);

        assert_eq!(board.keys().len(), 6);
        assert_eq!(board.current_batch(), Some("BATCH42"));
        assert_eq!(board.source(), Some(Source::Remote));
        assert_eq!(board.find(&last).unwrap().key_type, KeyType::Free24h);
        assert!(board.find("BC-missing:12H").is_none());

        let mut out = Vec::new();
        board.render(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "Batch BATCH42 (remote)");
        assert_eq!(lines[1], format!("[12H] {first}  12 Hour Access"));
        assert_eq!(lines[6], format!("[24H] {last}  24 Hour Access"));
    }

    #[test]
    fn test_show_replaces_previous_keys() {
        let generator = KeyGenerator::new();
        let mut board = KeyBoard::new();
        board.show(generator.generate_batch("1").unwrap(), Source::Remote);
        board.show(generator.generate_local_set().unwrap(), Source::Local);

        assert_eq!(board.keys().len(), 6);
        assert_eq!(board.source(), Some(Source::Local));
        assert_ne!(board.current_batch(), Some("1"));
    }
}
