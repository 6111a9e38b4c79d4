// Copyright (C) 2023 - 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

mod position;
mod source_line;

pub use self::{
    position::Position,
    source_line::SourceLine,
};
