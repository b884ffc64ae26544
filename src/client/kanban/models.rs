use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::client::dates;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: i64,
    pub content: String,
    #[serde(default)]
    pub is_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checklist {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
}

impl Checklist {
    /// `(completed, total)`
    pub fn progress(&self) -> (usize, usize) {
        let done = self.items.iter().filter(|i| i.is_completed).count();
        (done, self.items.len())
    }

    /// An empty checklist never counts as complete.
    pub fn is_complete(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(|i| i.is_completed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    pub list_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub position: i64,
    #[serde(default, with = "dates::option")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub checklists: Vec<Checklist>,
}

impl Card {
    pub fn checklist_progress(&self) -> (usize, usize) {
        self.checklists.iter().fold((0, 0), |(done, total), c| {
            let (d, t) = c.progress();
            (done + d, total + t)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardList {
    pub id: i64,
    pub title: String,
    pub position: i64,
    #[serde(default)]
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub lists: Vec<BoardList>,
}

impl Board {
    pub fn find_card(&self, card_id: i64) -> Option<&Card> {
        self.lists.iter().flat_map(|l| l.cards.iter()).find(|c| c.id == card_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCard {
    pub list_id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", with = "dates::option")]
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CardUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", with = "dates::option")]
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CardPosition {
    pub list_id: i64,
    pub position: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplyChecklistTemplate {
    pub template_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChecklistItemToggle {
    pub is_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Attachment {
    pub id: i64,
    pub file_name: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checklist(done: &[bool]) -> Checklist {
        Checklist {
            id: 1,
            title: "Onboarding".to_string(),
            items: done
                .iter()
                .enumerate()
                .map(|(i, &is_completed)| ChecklistItem {
                    id: i as i64,
                    content: format!("step {}", i),
                    is_completed,
                })
                .collect(),
        }
    }

    #[test]
    fn empty_checklist_is_never_complete() {
        assert!(!checklist(&[]).is_complete());
        assert!(checklist(&[true, true]).is_complete());
        assert!(!checklist(&[true, false]).is_complete());
    }

    #[test]
    fn card_progress_sums_its_checklists() {
        let card: Card = serde_json::from_value(serde_json::json!({
            "id": 7,
            "list_id": 1,
            "title": "New hire",
            "position": 0,
            "due_date": "2024-01-05T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(card.checklist_progress(), (0, 0));
        assert_eq!(card.due_date, NaiveDate::from_ymd_opt(2024, 1, 5));

        let card = Card {
            checklists: vec![checklist(&[true, false]), checklist(&[true])],
            ..card
        };
        assert_eq!(card.checklist_progress(), (2, 3));
    }
}
