//! Local notification log
//!
//! Successful saves across all sections append an entry here. The log is
//! only kept in the browser; each entry remembers the hub it came from.

use serde::{Deserialize, Serialize};

/// How many entries the panel shows.
pub const VISIBLE_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    /// Section that produced it, e.g. "Compras".
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub hub: String,
    /// RFC 3339
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
    #[serde(default)]
    pub read: bool,
}

impl Notification {
    pub fn new(kind: &str, title: &str, message: &str, hub: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind: kind.to_string(),
            title: title.to_string(),
            message: message.to_string(),
            hub: hub.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            read: false,
        }
    }

    pub fn kind_label(&self) -> &str {
        if self.kind.is_empty() {
            "Info"
        } else {
            &self.kind
        }
    }
}

/// Newest first.
pub fn push(log: &mut Vec<Notification>, n: Notification) {
    log.insert(0, n);
}

pub fn mark_read(log: &mut [Notification], id: &str) {
    if let Some(n) = log.iter_mut().find(|n| n.id == id) {
        n.read = true;
    }
}

pub fn mark_all_read(log: &mut [Notification]) {
    log.iter_mut().for_each(|n| n.read = true);
}

pub fn unread_count(log: &[Notification]) -> usize {
    log.iter().filter(|n| !n.read).count()
}

pub fn recent(log: &[Notification]) -> Vec<Notification> {
    log.iter().take(VISIBLE_LIMIT).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_read_flags() {
        let mut log = Vec::new();
        push(&mut log, Notification::new("Flota", "Vehículo agregado", "1234 ABC", "Hub Cadiz"));
        push(&mut log, Notification::new("Compras", "Agregado", "Cinta", "Hub Cadiz"));
        assert_eq!(log[0].kind, "Compras");
        assert_eq!(unread_count(&log), 2);

        let id = log[1].id.clone();
        mark_read(&mut log, &id);
        assert!(log[1].read);
        assert_eq!(unread_count(&log), 1);

        mark_all_read(&mut log);
        assert_eq!(unread_count(&log), 0);
    }

    #[test]
    fn test_recent_is_capped() {
        let mut log = Vec::new();
        for i in 0..25 {
            push(&mut log, Notification::new("x", &i.to_string(), "", "h"));
        }
        let r = recent(&log);
        assert_eq!(r.len(), VISIBLE_LIMIT);
        assert_eq!(r[0].title, "24");
    }

    #[test]
    fn test_wire_names() {
        let n = Notification::new("", "t", "m", "h");
        let v = serde_json::to_value(&n).unwrap();
        assert!(v.get("createdAt").is_some());
        assert!(v.get("type").is_some());
        assert_eq!(n.kind_label(), "Info");

        let stored = r#"[{"id":"a","type":"Flota","title":"t","message":"m","hub":"h","createdAt":"2024-01-01T00:00:00Z","read":true}]"#;
        let parsed: Vec<Notification> = serde_json::from_str(stored).unwrap();
        assert!(parsed[0].read);
    }
}
