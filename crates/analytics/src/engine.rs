use crate::report::{AgentTotals, SalesSummary};
use chrono::{DateTime, Utc};
use core_types::{Ledger, SaleRecord};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

/// The fixed commission rate paid to agents on the interior value they sold.
pub const COMMISSION_RATE: Decimal = dec!(0.10);

/// Commission owed on `total_value`.
pub fn commission_for(total_value: u64) -> Decimal {
    Decimal::from(total_value) * COMMISSION_RATE
}

/// Sales whose `sold_by` contains `agent_query`, ignoring case.
///
/// This is a substring match: `"jo"` selects both "John" and "Joanna".
pub fn filter_by_agent<'a>(ledger: &'a Ledger, agent_query: &str) -> Vec<&'a SaleRecord> {
    ledger
        .sales
        .iter()
        .filter(|sale| sale.sold_by_matches(agent_query))
        .collect()
}

/// Sales recorded at or after `since`.
pub fn filter_by_window(ledger: &Ledger, since: DateTime<Utc>) -> Vec<&SaleRecord> {
    ledger
        .sales
        .iter()
        .filter(|sale| sale.timestamp >= since)
        .collect()
}

/// Count, summed interior value and commission of `records`.
pub fn aggregate<'a, I>(records: I) -> SalesSummary
where
    I: IntoIterator<Item = &'a SaleRecord>,
{
    let (count, total_value) = records
        .into_iter()
        .fold((0usize, 0u64), |(count, total), sale| {
            (count + 1, total.saturating_add(sale.interior_value))
        });

    SalesSummary {
        count,
        total_value,
        commission: commission_for(total_value),
    }
}

/// Per-agent totals, in order of each agent's first sale.
///
/// The key is [`SaleRecord::agent_key`]; two spellings of one agent produce
/// two groups.
pub fn group_by_agent<'a, I>(records: I) -> Vec<AgentTotals>
where
    I: IntoIterator<Item = &'a SaleRecord>,
{
    let mut groups: Vec<AgentTotals> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for sale in records {
        let agent = sale.agent_key();
        let slot = match index.get(&agent) {
            Some(&slot) => slot,
            None => {
                groups.push(AgentTotals::new(agent.clone()));
                index.insert(agent, groups.len() - 1);
                groups.len() - 1
            }
        };
        let group = &mut groups[slot];
        group.count += 1;
        group.total_value = group.total_value.saturating_add(sale.interior_value);
    }

    groups
}
