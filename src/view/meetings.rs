use crate::client::meetings::models::{AgendaItem, AgendaOrder};

/// Moves the item at `from` to `to` and returns the new order for every
/// item, numbered from 1. Out-of-range indexes leave the order unchanged.
pub fn reorder_agenda(items: &[AgendaItem], from: usize, to: usize) -> Vec<AgendaOrder> {
    let mut sorted: Vec<&AgendaItem> = items.iter().collect();
    sorted.sort_by_key(|item| item.order_index);

    if from < sorted.len() && to < sorted.len() {
        let moved = sorted.remove(from);
        sorted.insert(to, moved);
    }

    sorted
        .iter()
        .zip(1..)
        .map(|(item, order_index)| AgendaOrder { id: item.id, order_index })
        .collect()
}

/// Total planned duration in minutes; items without a duration count as zero.
pub fn agenda_minutes(items: &[AgendaItem]) -> i32 {
    items.iter().filter_map(|item| item.duration_minutes).sum()
}
