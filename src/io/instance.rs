// src/io/instance.rs

use crate::error::InputError;
use crate::io::input::{OrderInput, ParsedInput, WarehouseInput};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Shape of a randomly generated delivery problem.
#[derive(Debug, Clone)]
pub struct InstanceConfig {
    pub rows: u32,
    pub cols: u32,
    pub num_drones: usize,
    pub deadline: u32,
    pub max_payload: u32,
    pub num_products: usize,
    /// Product weights are drawn uniformly from `1..=max_weight`.
    pub max_weight: u32,
    pub num_warehouses: usize,
    pub num_orders: usize,

    // Stock per (warehouse, product) ~ Normal(stock_mean, stock_std_dev)
    pub stock_mean: f64,
    pub stock_std_dev: f64,

    // Items per order ~ Normal(order_size_mean, order_size_std_dev), at least 1
    pub order_size_mean: f64,
    pub order_size_std_dev: f64,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            rows: 100,
            cols: 100,
            num_drones: 5,
            deadline: 500,
            max_payload: 200,
            num_products: 10,
            max_weight: 50,
            num_warehouses: 3,
            num_orders: 20,
            stock_mean: 8.0,
            stock_std_dev: 3.0,
            order_size_mean: 4.0,
            order_size_std_dev: 2.0,
        }
    }
}

/// Samples a non-negative integer from a normal distribution.
fn sample_count<R: Rng>(normal: &Normal<f64>, rng: &mut R) -> u32 {
    // Round to nearest integer and clamp negatives to 0
    let value = normal.sample(rng).round();
    if value < 0.0 {
        0
    } else {
        value as u32
    }
}

/// Generates a random instance that every optimizer can solve: each product
/// is light enough for one drone, and total stock covers total demand.
///
/// Shortfalls left by the stock draw are topped up at warehouse 0.
pub fn generate_instance(
    config: &InstanceConfig,
    seed: Option<u64>,
) -> Result<ParsedInput, InputError> {
    if config.rows == 0 || config.cols == 0 {
        return Err(InputError::InvalidParameters("the grid must not be empty".into()));
    }
    if config.num_warehouses == 0 || config.num_products == 0 {
        return Err(InputError::InvalidParameters(
            "at least one warehouse and one product are required".into(),
        ));
    }
    if config.max_payload == 0 {
        return Err(InputError::InvalidParameters("max_payload must be positive".into()));
    }

    let stock_dist = Normal::new(config.stock_mean, config.stock_std_dev)
        .map_err(|e| InputError::InvalidParameters(format!("stock distribution: {}", e)))?;
    let size_dist = Normal::new(config.order_size_mean, config.order_size_std_dev)
        .map_err(|e| InputError::InvalidParameters(format!("order size distribution: {}", e)))?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let location = |rng: &mut StdRng| {
        (
            rng.gen_range(0..config.rows) as i32,
            rng.gen_range(0..config.cols) as i32,
        )
    };

    let max_weight = config.max_weight.clamp(1, config.max_payload);
    let product_weights: Vec<u32> = (0..config.num_products)
        .map(|_| rng.gen_range(1..=max_weight))
        .collect();

    let mut warehouses: Vec<WarehouseInput> = (0..config.num_warehouses)
        .map(|_| WarehouseInput {
            location: location(&mut rng),
            stock: (0..config.num_products)
                .map(|_| sample_count(&stock_dist, &mut rng))
                .collect(),
        })
        .collect();

    let mut demand = vec![0u32; config.num_products];
    let orders: Vec<OrderInput> = (0..config.num_orders)
        .map(|_| {
            let destination = location(&mut rng);
            let num_items = sample_count(&size_dist, &mut rng).max(1) as usize;
            let product_types: Vec<usize> = (0..num_items)
                .map(|_| rng.gen_range(0..config.num_products))
                .collect();
            for &p in &product_types {
                demand[p] += 1;
            }
            OrderInput {
                destination,
                num_items,
                product_types,
            }
        })
        .collect();

    for (product, &needed) in demand.iter().enumerate() {
        let stocked: u32 = warehouses.iter().map(|w| w.stock[product]).sum();
        if stocked < needed {
            debug!(
                "Topping up product {} at warehouse 0 by {}",
                product,
                needed - stocked
            );
            warehouses[0].stock[product] += needed - stocked;
        }
    }

    Ok(ParsedInput {
        rows: config.rows,
        cols: config.cols,
        num_drones: config.num_drones,
        deadline: config.deadline,
        max_payload: config.max_payload,
        product_weights,
        warehouses,
        orders,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_instance_is_feasible() {
        let config = InstanceConfig {
            stock_mean: 1.0,
            stock_std_dev: 1.0,
            order_size_mean: 6.0,
            ..InstanceConfig::default()
        };
        let input = generate_instance(&config, Some(3)).unwrap();

        assert_eq!(input.warehouses.len(), config.num_warehouses);
        assert_eq!(input.orders.len(), config.num_orders);
        assert!(input.product_weights.iter().all(|&w| (1..=50).contains(&w)));

        for product in 0..config.num_products {
            let demand = input
                .orders
                .iter()
                .flat_map(|o| &o.product_types)
                .filter(|&&p| p == product)
                .count() as u32;
            let stock: u32 = input.warehouses.iter().map(|w| w.stock[product]).sum();
            assert!(stock >= demand, "product {} short", product);
        }
        for order in &input.orders {
            assert!(order.num_items >= 1);
            assert_eq!(order.num_items, order.product_types.len());
            assert!(order.destination.0 < 100 && order.destination.1 < 100);
        }
    }

    #[test]
    fn same_seed_same_instance() {
        let config = InstanceConfig::default();
        assert_eq!(
            generate_instance(&config, Some(11)).unwrap(),
            generate_instance(&config, Some(11)).unwrap()
        );
    }

    #[test]
    fn weights_never_exceed_payload() {
        let config = InstanceConfig {
            max_payload: 5,
            max_weight: 40,
            ..InstanceConfig::default()
        };
        let input = generate_instance(&config, Some(8)).unwrap();
        assert!(input.product_weights.iter().all(|&w| w <= 5));
    }

    #[test]
    fn rejects_bad_parameters() {
        let no_products = InstanceConfig {
            num_products: 0,
            ..InstanceConfig::default()
        };
        assert!(generate_instance(&no_products, Some(1)).is_err());

        let bad_spread = InstanceConfig {
            stock_std_dev: -1.0,
            ..InstanceConfig::default()
        };
        assert!(matches!(
            generate_instance(&bad_spread, Some(1)),
            Err(InputError::InvalidParameters(_))
        ));
    }
}
