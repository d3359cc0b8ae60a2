//! `agentdesk run`: Route a single task and print the result as JSON.

use agentdesk_config::AppConfig;

pub async fn run(session_id: String, task: String) -> Result<(), Box<dyn std::error::Error>> {
    if task.trim().is_empty() {
        return Err("task must not be empty".into());
    }

    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    tracing::debug!(config = ?config, "Loaded configuration");
    let router = agentdesk_agent::bootstrap(&config).await?;

    let result = router.execute(&session_id, &task).await;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
