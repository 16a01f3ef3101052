// SPDX-License-Identifier: MIT
// Copyright 2026 The CodeDIY Authors

//! Pre-filled message to the user's mechanic.
//!
//! The message is handed to the user's own mail client via a `mailto:` URL;
//! nothing is sent from here and there is no delivery confirmation.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::models::{VehicleSnapshot, VideoResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MechanicMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub mailto_url: String,
}

impl MechanicMessage {
    /// Compose a request for help with a trouble code.
    ///
    /// Videos the user rated helpful are listed so the mechanic can see what
    /// was already looked at.
    pub fn compose(
        mechanic_email: &str,
        vehicle: &VehicleSnapshot,
        code: &str,
        results: &[VideoResult],
    ) -> Result<Self> {
        let to = mechanic_email.trim();
        if to.is_empty() {
            return Err(AppError::BadRequest("Mechanic email is not set".to_string()));
        }

        let code = code.trim().to_uppercase();
        let car = format!("{} {} {}", vehicle.year, vehicle.make, vehicle.model);

        let subject = format!("Help needed with {} - Code {}", car, code);

        let mut body = format!(
            "Hello. I have a {car} with the check engine light on, and my scanner \
             reports code {code}. I looked into what could be causing it, but I either \
             don't have the tools for the repair, am not comfortable doing it myself, or \
             don't have the time.\n\n\
             Could you reply so we can set up an appointment to diagnose the issue and \
             get a quote for the repair?"
        );

        let helpful: Vec<&VideoResult> = results
            .iter()
            .filter(|v| v.rated && v.is_helpful == Some(true))
            .collect();
        if !helpful.is_empty() {
            body.push_str("\n\nVideos I found helpful:\n");
            for video in helpful {
                body.push_str(&format!("- {} ({})\n", video.title, video.watch_url()));
            }
        }

        let mailto_url = format!(
            "mailto:{}?subject={}&body={}",
            to,
            urlencoding::encode(&subject),
            urlencoding::encode(&body)
        );

        Ok(Self {
            to: to.to_string(),
            subject,
            body,
            mailto_url,
        })
    }
}
