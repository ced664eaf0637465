//! Substring relevance check used to pick one Guardian article per artist.

use crate::records::Article;

fn combined_text(article: &Article) -> String {
    format!("{} {} {}", article.title, article.trail_text, article.body).to_lowercase()
}

/// True when title, trail text or body mentions `artist`, ignoring case.
pub fn mentions_artist(artist: &str, article: &Article) -> bool {
    let needle = artist.to_lowercase();
    combined_text(article).contains(&needle)
}

/// First article, in service order, that mentions the artist.
pub fn select_relevant<'a>(artist: &str, articles: &'a [Article]) -> Option<&'a Article> {
    articles
        .iter()
        .find(|article| mentions_artist(artist, article))
}

#[cfg(test)]
mod tests {
    use super::{mentions_artist, select_relevant};
    use crate::records::Article;

    fn sample_article(id: &str, title: &str, trail_text: &str, body: &str) -> Article {
        Article {
            id: Some(id.to_string()),
            title: title.to_string(),
            trail_text: trail_text.to_string(),
            body: body.to_string(),
            ..Article::default()
        }
    }

    #[test]
    fn test_mentions_artist_ignores_case() {
        let article = sample_article("a", "Gardens", "", "<p>the late works of monet</p>");
        assert!(mentions_artist("Monet", &article));
        assert!(mentions_artist("MONET", &article));
    }

    #[test]
    fn test_mentions_artist_rejects_similar_names() {
        let article = sample_article("a", "Olympia", "Manet at the Salon", "Manet's nude");
        assert!(!mentions_artist("Monet", &article));
    }

    #[test]
    fn test_mentions_artist_matches_across_unicode_case() {
        let article = sample_article("a", "", "ÉDOUARD VUILLARD retrospective", "");
        assert!(mentions_artist("Édouard Vuillard", &article));
    }

    #[test]
    fn test_select_relevant_keeps_service_order() {
        let articles = vec![
            sample_article("first", "Manet show", "", ""),
            sample_article("second", "", "Monet at the Tate", ""),
            sample_article("third", "Monet again", "", ""),
        ];

        let selected = select_relevant("Monet", &articles).expect("a relevant article");
        assert_eq!(selected.id.as_deref(), Some("second"));
    }

    #[test]
    fn test_select_relevant_returns_none_without_mentions() {
        let articles = vec![sample_article("only", "Olympia", "Manet", "Manet")];
        assert!(select_relevant("Monet", &articles).is_none());
        assert!(select_relevant("Monet", &[]).is_none());
    }
}
