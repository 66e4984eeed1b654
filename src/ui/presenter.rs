//! Pure rendering of [`SearchState`] into view models and ratatui text.

use ratatui::text::{Line, Span};
use ratatui::widgets::ListItem;

use super::components::theme::{ThemePalette, chip_alt_style, chip_style, score_style};
use super::rich_text::TrustedHtml;
use crate::model::{Article, SearchResult};
use crate::search::SearchState;

pub const ENTER_QUERY_TEXT: &str = "Enter a query to search.";
pub const NO_MATCHES_TEXT: &str = "No results found.";
pub const LOADING_TEXT: &str = "Searching…";

/// What the results pane shows.
#[derive(Debug, PartialEq)]
pub enum ResultsView<'a> {
    Loading,
    /// Empty query and nothing to show.
    EnterQuery,
    /// A query was entered but the result list is empty.
    NoMatches,
    List(Vec<ResultRow<'a>>),
}

#[derive(Debug, PartialEq)]
pub struct ResultRow<'a> {
    pub result: &'a SearchResult,
    /// The row's article is the one currently displayed.
    pub selected: bool,
}

pub fn results_view(state: &SearchState) -> ResultsView<'_> {
    if state.loading() {
        return ResultsView::Loading;
    }
    if state.results().is_empty() {
        return if state.query().trim().is_empty() {
            ResultsView::EnterQuery
        } else {
            ResultsView::NoMatches
        };
    }
    ResultsView::List(
        state
            .results()
            .iter()
            .map(|result| ResultRow {
                result,
                selected: state.is_selected(result),
            })
            .collect(),
    )
}

/// Secondary line of a result row: `grupo - tema`.
pub fn result_subtitle(result: &SearchResult) -> String {
    format!("{} - {}", result.group, result.topic)
}

/// Text of the article pane.
#[derive(Debug, PartialEq)]
pub struct ArticleView {
    pub title: String,
    pub group_chip: String,
    pub topic_chip: String,
    pub body: Vec<String>,
}

pub fn article_view(article: &Article) -> ArticleView {
    ArticleView {
        title: article.question.clone(),
        group_chip: format!("Group: {}", article.group),
        topic_chip: format!("Topic: {}", article.topic),
        body: TrustedHtml::new(&article.answer).to_plain_lines(),
    }
}

/// List items for the results pane. `cursor` marks the keyboard position.
pub fn result_items(
    rows: &[ResultRow<'_>],
    cursor: Option<usize>,
    palette: ThemePalette,
) -> Vec<ListItem<'static>> {
    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            let marker = if cursor == Some(idx) { "▶ " } else { "  " };
            let mut headline = vec![
                Span::styled(marker, palette.cursor_style()),
                Span::styled(row.result.question.clone(), palette.title_subtle()),
            ];
            if let Some(score) = row.result.score {
                headline.push(Span::raw(" "));
                headline.push(Span::styled(
                    format!("{score:.2}"),
                    score_style(score, palette),
                ));
            }
            let subtitle = Line::from(vec![
                Span::raw("  "),
                Span::styled(result_subtitle(row.result), palette.hint_style()),
            ]);
            let item = ListItem::new(vec![Line::from(headline), subtitle]);
            if row.selected {
                item.style(palette.selected_style())
            } else {
                item
            }
        })
        .collect()
}

/// Lines of the article pane.
pub fn article_lines(view: &ArticleView, palette: ThemePalette) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::styled(view.title.clone(), palette.title()),
        Line::default(),
        Line::from(vec![
            Span::styled(format!("[{}]", view.group_chip), chip_style(palette)),
            Span::raw("  "),
            Span::styled(format!("[{}]", view.topic_chip), chip_alt_style(palette)),
        ]),
        Line::default(),
    ];
    lines.extend(
        view.body
            .iter()
            .map(|l| Line::styled(l.clone(), palette.body_style())),
    );
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::NetworkError;
    use crate::model::ArticleId;
    use crate::search::{ResponseOrdering, SearchFilters};

    fn state() -> SearchState {
        SearchState::new(SearchFilters::default(), ResponseOrdering::LastCompleted, None)
    }

    fn result(id: i64) -> SearchResult {
        SearchResult {
            id: ArticleId::Int(id),
            question: format!("Question {id}"),
            group: "Pagos".into(),
            topic: "Tarjetas".into(),
            score: Some(0.7),
            answer: None,
        }
    }

    #[test]
    fn test_placeholder_when_query_empty() {
        let s = state();
        assert_eq!(results_view(&s), ResultsView::EnterQuery);
    }

    #[test]
    fn test_no_matches_when_query_set_and_results_empty() {
        let mut s = state();
        s.set_query("nothing");
        let req = s.submit_search().unwrap();
        s.finish_search(req.seq, Err(NetworkError::new("/search", "refused")));
        assert_eq!(results_view(&s), ResultsView::NoMatches);
    }

    #[test]
    fn test_loading_hides_list() {
        let mut s = state();
        s.set_query("cards");
        s.submit_search();
        assert_eq!(results_view(&s), ResultsView::Loading);
    }

    #[test]
    fn test_selected_row_flagged() {
        let mut s = state();
        s.set_query("cards");
        let req = s.submit_search().unwrap();
        s.finish_search(req.seq, Ok(vec![result(1), result(2)]));
        let art = s.select_article(ArticleId::Int(2));
        s.finish_article(
            art.seq,
            Ok(Article {
                id: ArticleId::Text("2".into()),
                question: "Question 2".into(),
                group: "Pagos".into(),
                topic: "Tarjetas".into(),
                answer: "<p>Body</p>".into(),
            }),
        );

        let ResultsView::List(rows) = results_view(&s) else {
            panic!("expected a list");
        };
        assert_eq!(
            rows.iter().map(|r| r.selected).collect::<Vec<_>>(),
            vec![false, true]
        );
        assert_eq!(result_subtitle(rows[0].result), "Pagos - Tarjetas");
        assert_eq!(result_items(&rows, Some(0), ThemePalette::dark()).len(), 2);
    }

    #[test]
    fn test_article_view_flattens_body() {
        let article = Article {
            id: ArticleId::Int(9),
            question: "¿Cómo pago?".into(),
            group: "Pagos".into(),
            topic: "Tarjetas".into(),
            answer: "<p>Con tarjeta.</p><p>O transferencia.</p>".into(),
        };
        let view = article_view(&article);
        assert_eq!(view.title, "¿Cómo pago?");
        assert_eq!(view.group_chip, "Group: Pagos");
        assert_eq!(view.topic_chip, "Topic: Tarjetas");
        assert_eq!(view.body, vec!["Con tarjeta.", "O transferencia."]);
        assert_eq!(article_lines(&view, ThemePalette::dark()).len(), 6);
    }
}
