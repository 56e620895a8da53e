use crate::library::logger::interface::{join_namespace, Logger};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub enum LogLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub namespace: Option<String>,
    pub message: String,
}

/// Keeps every line in memory. Namespaced children share the parent's buffer.
#[derive(Debug, Clone, Default)]
pub struct LoggerMemory {
    namespace: Option<String>,
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl LoggerMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn errors(&self) -> Vec<LogEntry> {
        self.entries()
            .into_iter()
            .filter(|entry| entry.level == LogLevel::Error)
            .collect()
    }

    fn push(
        &self,
        level: LogLevel,
        message: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| format!("log buffer poisoned: {}", e))?;
        entries.push(LogEntry {
            level,
            namespace: self.namespace.clone(),
            message: message.to_string(),
        });
        Ok(())
    }
}

impl Logger for LoggerMemory {
    fn info(&self, message: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.push(LogLevel::Info, message)
    }

    fn error(&self, message: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.push(LogLevel::Error, message)
    }

    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync> {
        Arc::new(LoggerMemory {
            namespace: Some(join_namespace(&self.namespace, namespace)),
            entries: self.entries.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespaces_share_buffer() {
        let logger = LoggerMemory::new();
        let child = logger.with_namespace("camera").with_namespace("fake");

        child.info("started").unwrap();
        logger.error("boom").unwrap();

        let entries = logger.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].namespace.as_deref(), Some("camera:fake"));
        assert_eq!(entries[0].level, LogLevel::Info);
        assert_eq!(entries[1].namespace, None);
        assert_eq!(logger.errors().len(), 1);
    }
}
