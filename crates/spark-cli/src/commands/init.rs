use anyhow::Result;

use spark_core::secret::SecretService;

use super::AppContext;

pub async fn run(ctx: &AppContext) -> Result<()> {
    let secrets = ctx.secret_service()?;
    let existed = secrets.secret_file_exists().await;
    let path = secrets.ensure_secret_file().await?;

    if existed {
        println!("secret.json already exists: {}", path.display());
    } else {
        println!("Created {}", path.display());
        println!("Add your Gemini API key there, or set GEMINI_API_KEY.");
    }
    Ok(())
}
