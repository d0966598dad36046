// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Validated value objects shared across aggregates.
//!
//! Each newtype enforces its invariant in the constructor and is otherwise
//! an opaque string. Construction failures surface as
//! [`DomainError::Validation`].

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Case-insensitive unique e-mail address. Stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = raw.as_ref().trim();
        if !Self::is_valid(trimmed) {
            return Err(DomainError::validation("Email inválido"));
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    fn is_valid(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };
        if local.is_empty() || local.len() > 64 {
            return false;
        }
        if domain.is_empty() || domain.len() > 255 {
            return false;
        }
        if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
            return false;
        }
        if !local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c))
        {
            return false;
        }
        // Domain must contain a dot with a 2+ letter TLD.
        let Some((name, tld)) = domain.rsplit_once('.') else {
            return false;
        };
        if name.is_empty() || tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
            return false;
        }
        domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or_default()
    }

    pub fn domain(&self) -> &str {
        self.0.split('@').nth(1).unwrap_or_default()
    }

    /// Partially hidden form for privacy-sensitive surfaces.
    pub fn masked(&self) -> String {
        let (local, domain) = self.0.split_once('@').unwrap_or((self.0.as_str(), ""));
        if local.len() <= 3 {
            format!("{}***@{domain}", &local[..1])
        } else {
            format!("{}***@{domain}", &local[..3])
        }
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ten-digit phone number; spaces and dashes are stripped on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DomainError> {
        let cleaned: String = raw
            .as_ref()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();
        if cleaned.len() != 10 || !cleaned.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::validation("El teléfono debe tener 10 dígitos"));
        }
        Ok(Self(cleaned))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Phone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Password material, either plaintext pending hashing or an opaque hash.
///
/// Plaintext construction enforces the 6..=100 character rule; hashes are
/// accepted verbatim since their shape belongs to the hasher port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Password {
    value: String,
    hashed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

impl Password {
    pub fn new(plain: impl Into<String>) -> Result<Self, DomainError> {
        let plain = plain.into();
        if plain.len() < 6 || plain.len() > 100 {
            return Err(DomainError::validation(
                "La contraseña debe tener al menos 6 caracteres",
            ));
        }
        Ok(Self { value: plain, hashed: false })
    }

    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { value: hash.into(), hashed: true }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn is_hashed(&self) -> bool {
        self.hashed
    }

    pub fn strength(&self) -> PasswordStrength {
        if self.hashed {
            return PasswordStrength::Strong;
        }
        let mut points = 0;
        if self.value.len() >= 8 {
            points += 1;
        }
        if self.value.len() >= 12 {
            points += 1;
        }
        if self.value.chars().any(|c| c.is_ascii_lowercase()) {
            points += 1;
        }
        if self.value.chars().any(|c| c.is_ascii_uppercase()) {
            points += 1;
        }
        if self.value.chars().any(|c| c.is_ascii_digit()) {
            points += 1;
        }
        if self.value.chars().any(|c| !c.is_ascii_alphanumeric()) {
            points += 1;
        }
        match points {
            0..=2 => PasswordStrength::Weak,
            3..=4 => PasswordStrength::Medium,
            _ => PasswordStrength::Strong,
        }
    }
}

/// Absolute web URL (social links).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Url(String);

impl Url {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() || trimmed.len() > 2048 {
            return Err(DomainError::validation("URL inválida"));
        }
        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(DomainError::validation("URL inválida"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Url {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque location of a stored file, as returned by the storage port.
/// May be absolute or relative to the storage base URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileUrl(String);

impl FileUrl {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation(
                "La URL del archivo no puede estar vacía",
            ));
        }
        if trimmed.len() > 2048 {
            return Err(DomainError::validation("La URL del archivo es demasiado larga"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or_default()
    }

    pub fn extension(&self) -> Option<String> {
        let name = self.file_name();
        let (_, ext) = name.rsplit_once('.')?;
        if ext.is_empty() {
            return None;
        }
        Some(ext.to_lowercase())
    }

    pub fn is_image(&self) -> bool {
        matches!(
            self.extension().as_deref(),
            Some("jpg" | "jpeg" | "png" | "gif" | "webp" | "svg" | "bmp")
        )
    }

    pub fn is_pdf(&self) -> bool {
        self.extension().as_deref() == Some("pdf")
    }
}

impl std::fmt::Display for FileUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
