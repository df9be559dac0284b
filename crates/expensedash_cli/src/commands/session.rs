//! Session commands.

use super::{CommandError, Context};

/// Runs the `me` command.
pub fn me(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let user = ctx.session.fetch_user().ok_or(CommandError::NotSignedIn)?;
    ctx.emit(&user, |user| {
        format!(
            "{} <{}>\nid: {}\nprovider: {:?}",
            user.display_name(),
            user.email,
            user.id,
            user.provider
        )
    })
}

/// Runs the `logout` command.
pub fn logout(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    ctx.session.logout()?;
    println!("Logged out");
    Ok(())
}
