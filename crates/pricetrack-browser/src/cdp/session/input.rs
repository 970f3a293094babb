//! Mouse input operations for CDP page session.

use serde_json::json;
use tracing::trace;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::MouseEventType;

use super::core::PageSession;

impl PageSession {
    /// Move mouse to coordinates.
    pub async fn mouse_move(&self, x: f64, y: f64) -> Result<(), CdpError> {
        self.call(
            "Input.dispatchMouseEvent",
            Some(json!({
                "type": MouseEventType::MouseMoved,
                "x": x,
                "y": y,
            })),
        )
        .await?;
        trace!("Mouse moved to ({}, {})", x, y);
        Ok(())
    }

    /// Dispatch a wheel event at `(x, y)`.
    pub async fn scroll(&self, x: f64, y: f64, delta_x: f64, delta_y: f64) -> Result<(), CdpError> {
        self.call(
            "Input.dispatchMouseEvent",
            Some(json!({
                "type": MouseEventType::MouseWheel,
                "x": x,
                "y": y,
                "deltaX": delta_x,
                "deltaY": delta_y,
            })),
        )
        .await?;
        Ok(())
    }

    /// Intermediate points of a pointer path from `from` to `to`, ending at `to`.
    pub(super) fn interpolate(from: (f64, f64), to: (f64, f64), steps: u32) -> Vec<(f64, f64)> {
        let steps = steps.max(1);
        (1..=steps)
            .map(|i| {
                let t = i as f64 / steps as f64;
                (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t)
            })
            .collect()
    }

    /// Move the mouse from `from` to `to` in `steps` evenly spaced events.
    pub async fn mouse_move_path(
        &self,
        from: (f64, f64),
        to: (f64, f64),
        steps: u32,
    ) -> Result<(), CdpError> {
        for (x, y) in Self::interpolate(from, to, steps) {
            self.mouse_move(x, y).await?;
        }
        Ok(())
    }
}
