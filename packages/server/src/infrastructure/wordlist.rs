//! File-backed word list for the censor.
//!
//! The file is newline-delimited, one term per line. It is read once at
//! startup; a missing or unreadable file disables censorship with a warning.

use std::{
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::domain::{Censor, CensorError};

#[derive(Debug, Error)]
pub enum WordListError {
    #[error("word list {0} not found")]
    NotFound(PathBuf),

    #[error("failed to read word list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Censor(#[from] CensorError),
}

/// Split file content into lowercase terms, skipping blank lines.
pub fn parse_word_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|word| !word.is_empty())
        .collect()
}

/// Read and parse the word list at `path`.
pub async fn read_word_list(path: &Path) -> Result<Vec<String>, WordListError> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(parse_word_list(&content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(WordListError::NotFound(path.to_path_buf()))
        }
        Err(source) => Err(WordListError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Build a censor from the word list at `path`, or a disabled one if the
/// list cannot be loaded.
pub async fn load_censor(path: &Path) -> Censor {
    match try_load_censor(path).await {
        Ok(censor) => censor,
        Err(e) => {
            tracing::warn!("{}, no censorship applied", e);
            Censor::disabled()
        }
    }
}

async fn try_load_censor(path: &Path) -> Result<Censor, WordListError> {
    let words = read_word_list(path).await?;
    let count = words.len();
    let censor = Censor::new(words)?;
    tracing::info!("Loaded {} banned words from {}", count, path.display());
    Ok(censor)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// テストごとに一意な一時ファイルのパス
    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("agora-wordlist-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_parse_word_list() {
        // テスト項目: 空行を除き、前後の空白を取り除いて小文字化する
        // given (前提条件):
        let content = "Spam\n\n  EGGS  \r\nham\n   \n";

        // when (操作):
        let words = parse_word_list(content);

        // then (期待する結果):
        assert_eq!(words, vec!["spam", "eggs", "ham"]);
    }

    #[tokio::test]
    async fn test_load_censor_from_file() {
        // テスト項目: ファイルから読み込んだ語で検閲できる
        // given (前提条件):
        let path = temp_path("present.txt");
        tokio::fs::write(&path, "spam\n").await.unwrap();

        // when (操作):
        let censor = load_censor(&path).await;
        tokio::fs::remove_file(&path).await.unwrap();

        // then (期待する結果):
        assert!(censor.is_enabled());
        assert_eq!(censor.apply("no spam please"), "no **** please");
    }

    #[tokio::test]
    async fn test_missing_file_disables_censorship() {
        // テスト項目: ファイルが存在しない場合は検閲なしで続行する
        // given (前提条件):
        let path = temp_path("missing.txt");

        // when (操作):
        let read = read_word_list(&path).await;
        let censor = load_censor(&path).await;

        // then (期待する結果):
        assert!(matches!(read, Err(WordListError::NotFound(_))));
        assert!(!censor.is_enabled());
        assert_eq!(censor.apply("spam"), "spam");
    }
}
