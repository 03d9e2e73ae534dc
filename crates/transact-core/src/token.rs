// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Closed string vocabularies shared by the config and event models.

/// An enum with a closed, named set of variants.
///
/// `name` is the upper-snake-case variant name (`USER_LINK`) that decoded
/// tokens are matched against; `wire_token` is the lower-case form used
/// when rendering the value back to the host (`user-link`).
pub trait TokenEnum: Copy + PartialEq + 'static {
    /// Type name used in decode error messages.
    const KIND: &'static str;

    /// Every variant, in declaration order.
    const VARIANTS: &'static [Self];

    fn name(self) -> &'static str;

    /// Exact match against [`TokenEnum::name`].
    fn from_name(name: &str) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| v.name() == name)
    }

    fn wire_token(self) -> String {
        self.name().to_ascii_lowercase().replace('_', "-")
    }
}
