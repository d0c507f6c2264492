use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match receipt_recipe_client::run().await {
        Ok(state) => {
            log::info!("APIサーバー: {}", state.api_client.base_url());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::log!(e.severity().log_level(), "起動に失敗しました: {}", e.details());
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
