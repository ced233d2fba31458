use rust_decimal::{Decimal, RoundingStrategy};

/// Base fare per kilometre flown, before the seat-class multiplier.
fn base_price_per_km() -> Decimal {
    Decimal::new(1, 1) // 0.1
}

/// Derive a ticket price from route distance and seat-class multiplier.
///
/// Pure and deterministic: `0.1 * distance_km * multiplier`, quantized
/// half-up to 2 decimal places. This is the only source of ticket prices;
/// stored prices are recomputed from it on every write.
pub fn ticket_price(distance_km: i32, multiplier: Decimal) -> Decimal {
    (base_price_per_km() * Decimal::from(distance_km) * multiplier)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_formula() {
        // 0.1 * 1000 * 1.50 = 150.00
        let price = ticket_price(1000, Decimal::new(150, 2));
        assert_eq!(price, Decimal::new(15000, 2));
    }

    #[test]
    fn test_price_quantized_to_two_decimals() {
        // 0.1 * 333 * 1.33 = 44.289 -> 44.29
        let price = ticket_price(333, Decimal::new(133, 2));
        assert_eq!(price, Decimal::new(4429, 2));
        assert_eq!(price.scale(), 2);
    }

    #[test]
    fn test_midpoints_round_half_up() {
        // 0.1 * 1 * 1.25 = 0.125 -> 0.13 (banker's would give 0.12)
        let price = ticket_price(1, Decimal::new(125, 2));
        assert_eq!(price, Decimal::new(13, 2));
    }

    #[test]
    fn test_multiplier_of_one_is_distance_times_base() {
        assert_eq!(ticket_price(100, Decimal::ONE), Decimal::new(1000, 2));
    }
}
