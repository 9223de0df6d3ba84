//! Dashboard command implementation.

use anyhow::Result;

use super::common::{Session, Target};

/// Execute the dashboard command.
pub async fn execute(target: &Target) -> Result<()> {
    let mut session = Session::open(target, false)?;

    // A failed summary still draws the empty dashboard.
    let result = session.app.start().await;
    session.screen.present();
    result?;
    Ok(())
}
