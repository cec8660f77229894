//! Conversation plumbing shared by the `chat` and `ask` commands.

use lexibot_core::{AppError, AppResult};
use lexibot_llm::ChatSession;
use std::io::Write;
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

/// Load the conversation kept in `path`, or start a fresh one.
pub fn open_session(path: Option<&Path>) -> AppResult<ChatSession> {
    match path {
        Some(path) => {
            let session = ChatSession::load(path)?;
            tracing::info!("Resuming session {:?} ({} turns)", path, session.len());
            Ok(session)
        }
        None => Ok(ChatSession::new()),
    }
}

/// Persist the conversation when a session file was requested.
pub fn save_session(session: &ChatSession, path: Option<&Path>) -> AppResult<()> {
    match path {
        Some(path) => session.save(path),
        None => Ok(()),
    }
}

/// Require a query unless questions will be read interactively.
pub fn check_query(query: Option<&str>, interactive: bool) -> AppResult<()> {
    if query.is_none() && !interactive {
        return Err(AppError::Other(
            "Provide a query or use --interactive".to_string(),
        ));
    }
    Ok(())
}

/// Questions typed on stdin, one per line.
pub fn stdin_questions() -> Lines<BufReader<Stdin>> {
    BufReader::new(tokio::io::stdin()).lines()
}

/// Prompt for and read the next question.
///
/// Blank lines are skipped. Returns `None` at end of input or when the user
/// types `exit` or `quit`.
pub async fn next_question<R>(lines: &mut Lines<R>) -> AppResult<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            return Ok(None);
        };

        match line.trim() {
            "" => continue,
            "exit" | "quit" => return Ok(None),
            question => return Ok(Some(question.to_string())),
        }
    }
}
