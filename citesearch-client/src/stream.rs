//! Helpers for consuming lazy result streams

use futures_util::{Stream, StreamExt, TryStreamExt};

use crate::error::Result;

/// Collect the first `n` items of a result stream, in upstream order
///
/// Polling stops once `n` items have been received, so a paged source is not
/// asked for more pages than needed. The first error ends collection.
///
/// ```
/// use citesearch_client::stream::take_results;
/// use futures_util::stream;
///
/// # #[tokio::main]
/// # async fn main() -> citesearch_client::Result<()> {
/// let urls = stream::iter((1..=12).map(|i| Ok(format!("https://example.com/{i}"))));
/// let first = take_results(urls, 5).await?;
/// assert_eq!(first.len(), 5);
/// assert_eq!(first[0], "https://example.com/1");
/// # Ok(())
/// # }
/// ```
pub async fn take_results<S, T>(stream: S, n: usize) -> Result<Vec<T>>
where
    S: Stream<Item = Result<T>>,
{
    stream.take(n).try_collect().await
}
