//! HTTP-Handler

pub mod app;
pub mod konto;
pub mod seiten;
