use std::collections::HashMap;

use crate::error::ValidationError;
use crate::schemas::{Assignments, Dish, PersonName, PersonTotal, SplitResult};

pub fn calculate(
    dishes: &[Dish],
    people: &[PersonName],
    assignments: &Assignments,
) -> Result<SplitResult, ValidationError> {
    for dish in dishes {
        validate_price(dish)?;
    }

    // Duplicate names collapse into one person, first appearance decides the order
    let mut totals: Vec<(PersonName, f64)> = Vec::with_capacity(people.len());
    let mut positions: HashMap<&str, usize> = HashMap::with_capacity(people.len());
    for person in people {
        positions.entry(person.as_str()).or_insert_with(|| {
            totals.push((person.clone(), 0.0));
            totals.len() - 1
        });
    }

    for dish in dishes {
        let eaters = match assignments.get(&dish.name) {
            Some(eaters) if !eaters.is_empty() => eaters,
            _ => continue,
        };
        // Unknown eaters still count as a share, their part is simply dropped
        let amount_per_eater = dish.price / eaters.len() as f64;
        for eater in eaters {
            if let Some(&position) = positions.get(eater.as_str()) {
                totals[position].1 += amount_per_eater;
            }
        }
    }

    let total = dishes.iter().map(|dish| dish.price).sum::<f64>();
    if !total.is_finite() {
        return Err(ValidationError::TotalOverflow);
    }

    Ok(SplitResult {
        results: totals
            .into_iter()
            .map(|(name, amount)| PersonTotal {
                name,
                amount: round_to_2_decimals(amount),
            })
            .collect(),
        total: round_to_2_decimals(total),
    })
}

fn validate_price(dish: &Dish) -> Result<(), ValidationError> {
    if !dish.price.is_finite() {
        return Err(ValidationError::NonFinitePrice {
            dish: dish.name.clone(),
        });
    }
    if dish.price < 0.0 {
        return Err(ValidationError::NegativePrice {
            dish: dish.name.clone(),
            price: dish.price,
        });
    }
    Ok(())
}

// From 2^52 / 100 on an f64 has no cent fraction left to round
const CENT_PRECISION_LIMIT: f64 = 4_503_599_627_370_496.0 / 100.0;

pub fn round_to_2_decimals(n: f64) -> f64 {
    if n.abs() >= CENT_PRECISION_LIMIT {
        return n;
    }
    (n * 100.0).round() / 100.0
}
