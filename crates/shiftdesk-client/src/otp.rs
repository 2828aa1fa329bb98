//! Code entry boxes and the resend cooldown.
//!
//! Pure state: nothing here sleeps or talks to the network. Focus movement
//! and auto-submission are returned to the caller as [`EntryUpdate`].

use shiftdesk_types::ValidationError;

pub const DEFAULT_CODE_LENGTH: usize = 4;

/// Seconds before a new code may be requested.
pub const RESEND_WINDOW_SECS: u32 = 300;

/// What the caller should do after an edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryUpdate {
    /// Box that should receive focus next.
    pub focus: Option<usize>,
    /// Complete code to verify right away.
    pub submit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpEntry {
    digits: Vec<Option<char>>,
    cooldown: u32,
    window: u32,
}

impl Default for OtpEntry {
    fn default() -> Self {
        Self::new()
    }
}

impl OtpEntry {
    pub fn new() -> Self {
        Self::with_length(DEFAULT_CODE_LENGTH, RESEND_WINDOW_SECS)
    }

    /// `length` boxes; cooldown starts at `window` seconds.
    pub fn with_length(length: usize, window: u32) -> Self {
        Self { digits: vec![None; length.max(1)], cooldown: window, window }
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.iter().all(Option::is_none)
    }

    pub fn digits(&self) -> &[Option<char>] {
        &self.digits
    }

    pub fn filled(&self) -> usize {
        self.digits.iter().filter(|d| d.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.filled() == self.len()
    }

    /// Entered digits in order, skipping empty boxes.
    pub fn code(&self) -> String {
        self.digits.iter().flatten().collect()
    }

    fn update_after_write(&self, focus: Option<usize>) -> EntryUpdate {
        EntryUpdate { focus, submit: self.is_complete().then(|| self.code()) }
    }

    /// Type into box `index`. Only a single digit or an empty string (delete) is accepted.
    pub fn set_digit(&mut self, index: usize, input: &str) -> EntryUpdate {
        if index >= self.len() {
            return EntryUpdate::default();
        }

        let mut chars = input.chars();
        match (chars.next(), chars.next()) {
            (None, _) => {
                self.digits[index] = None;
                EntryUpdate::default()
            }
            (Some(c), None) if c.is_ascii_digit() => {
                self.digits[index] = Some(c);
                let focus = (index + 1 < self.len()).then_some(index + 1);
                self.update_after_write(focus)
            }
            _ => EntryUpdate::default(),
        }
    }

    /// Fill from the first box with the digits found in `text`, overwriting.
    pub fn paste(&mut self, text: &str) -> EntryUpdate {
        let pasted: Vec<char> =
            text.chars().filter(char::is_ascii_digit).take(self.len()).collect();
        if pasted.is_empty() {
            return EntryUpdate::default();
        }

        for (slot, digit) in self.digits.iter_mut().zip(&pasted) {
            *slot = Some(*digit);
        }

        // Only a full paste submits, even if older digits complete the code.
        let last = self.len() - 1;
        if pasted.len() == self.len() {
            EntryUpdate { focus: Some(last), submit: Some(self.code()) }
        } else {
            EntryUpdate { focus: Some(pasted.len().min(last)), submit: None }
        }
    }

    /// Backspace on an empty box moves focus back; data is untouched.
    pub fn backspace_at(&self, index: usize) -> Option<usize> {
        let current = self.digits.get(index)?;
        (current.is_none() && index > 0).then(|| index - 1)
    }

    /// Manual submit.
    pub fn submit(&self) -> Result<String, ValidationError> {
        if self.is_complete() {
            Ok(self.code())
        } else {
            Err(ValidationError::IncompleteCode { expected: self.len(), entered: self.filled() })
        }
    }

    pub fn clear(&mut self) {
        self.digits.iter_mut().for_each(|d| *d = None);
    }

    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    pub fn can_resend(&self) -> bool {
        self.cooldown == 0
    }

    /// One second elapsed. Returns true on the tick that enables resend.
    pub fn tick(&mut self) -> bool {
        if self.cooldown == 0 {
            return false;
        }
        self.cooldown -= 1;
        self.cooldown == 0
    }

    /// Accepted only once the cooldown is over: restarts it and clears the boxes.
    pub fn resend(&mut self) -> bool {
        if !self.can_resend() {
            return false;
        }
        self.cooldown = self.window;
        self.clear();
        true
    }

    /// Cooldown as `m:ss`.
    pub fn remaining_label(&self) -> String {
        format!("{}:{:02}", self.cooldown / 60, self.cooldown % 60)
    }
}
