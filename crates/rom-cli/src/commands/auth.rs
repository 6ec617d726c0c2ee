use anyhow::Result;

use super::Ctx;

pub async fn login(config_paths: &[String], username: &str, password: &str) -> Result<()> {
    let mut ctx = Ctx::load(config_paths)?;
    let user = ctx.session.login(&ctx.api, username, password).await?;
    println!("logged_in=true user_id={} username={}", user.id, user.username);
    Ok(())
}

pub async fn register(config_paths: &[String], username: &str, password: &str) -> Result<()> {
    let mut ctx = Ctx::load(config_paths)?;
    let user = ctx.session.register(&ctx.api, username, password).await?;
    println!("registered=true user_id={} username={}", user.id, user.username);
    Ok(())
}

pub fn logout(config_paths: &[String]) -> Result<()> {
    let mut ctx = Ctx::load(config_paths)?;
    ctx.session.logout()?;
    println!("logged_out=true");
    Ok(())
}

pub fn whoami(config_paths: &[String]) -> Result<()> {
    let ctx = Ctx::load(config_paths)?;
    match ctx.session.user() {
        Some(user) => println!(
            "user_id={} username={} role={}",
            user.id, user.username, user.role
        ),
        None => anyhow::bail!("not logged in"),
    }
    Ok(())
}
