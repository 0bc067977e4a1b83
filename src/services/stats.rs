//! Landing summary counts

use crate::{error::AppResult, repository::Repository};

/// Catalog cardinalities for the landing summary, computed fresh per call
#[derive(Debug, Clone, Copy)]
pub struct SummaryCounts {
    pub num_books: i64,
    pub num_instances: i64,
    pub num_instances_available: i64,
    pub num_authors: i64,
    pub num_genres: i64,
    pub num_word_the: i64,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn summary(&self) -> AppResult<SummaryCounts> {
        Ok(SummaryCounts {
            num_books: self.repository.books.count().await?,
            num_instances: self.repository.instances.count().await?,
            num_instances_available: self.repository.instances.count_available().await?,
            num_authors: self.repository.authors.count().await?,
            num_genres: self.repository.genres.count().await?,
            num_word_the: self.repository.books.count_title_containing("the").await?,
        })
    }
}
