// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub const SUCCESS: &str = "Success";
pub const DELETED: &str = "Supplier has been Deleted!";
pub const DISABLED: &str = "Supplier unavailable!";
pub const DELETE_FAILED: &str = "Server error!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

/// Single-slot message area: a new notice replaces the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Notifications {
    current: Option<Notice>,
}

impl Notifications {
    pub fn info(&mut self, text: impl Into<String>) {
        self.post(NoticeLevel::Info, text.into());
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.post(NoticeLevel::Error, text.into());
    }

    fn post(&mut self, level: NoticeLevel, text: String) {
        self.current = Some(Notice { level, text });
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    pub fn text(&self) -> Option<&str> {
        self.current.as_ref().map(|notice| notice.text.as_str())
    }
}
