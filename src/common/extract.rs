// src/common/extract.rs

use axum::extract::FromRequest;

use crate::common::error::AppError;

// Igual ao `Json` do axum, mas um corpo malformado vira 400 (AppError::BadRequest)
// em vez do 422 padrão.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
