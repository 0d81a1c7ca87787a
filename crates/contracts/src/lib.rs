//! Wire and domain types shared by the farmer registry backend and its clients.

pub mod domain;
