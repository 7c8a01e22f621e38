// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod backend;

pub use backend::FakeBackend;

use supplierdesk_app::SupplierPayload;

const SUPPLIER_TRADES: [&str; 12] = [
    "Lumber",
    "Fasteners",
    "Electrical",
    "Plumbing",
    "Packaging",
    "Textiles",
    "Fabrication",
    "Chemicals",
    "Paper",
    "Glass",
    "Hardware",
    "Logistics",
];

const SUPPLIER_SUFFIXES: [&str; 6] = ["Supply", "Trading", "Co", "Wholesale", "Works", "Group"];
const SUPPLIER_ADJECTIVES: [&str; 12] = [
    "Premier",
    "Central",
    "Reliable",
    "Bright",
    "Quality",
    "Summit",
    "Eagle",
    "Heritage",
    "Greenleaf",
    "Sparks",
    "Hartley",
    "Apex",
];

const CITIES: [&str; 14] = [
    "Austin",
    "Seattle",
    "Denver",
    "Madison",
    "Raleigh",
    "Pittsburgh",
    "Portland",
    "Boise",
    "Phoenix",
    "Nashville",
    "Columbus",
    "Minneapolis",
    "Omaha",
    "Tucson",
];
const STREET_NAMES: [&str; 12] = [
    "Cedar", "Maple", "Oak", "Pine", "Willow", "Elm", "Birch", "Juniper", "Ridge", "Valley",
    "Meadow", "Canyon",
];
const EMAIL_DOMAINS: [&str; 5] = [
    "example-supply.com",
    "wholesale.local",
    "trade-group.net",
    "vendors.io",
    "parts.org",
];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Seeded generator for plausible supplier payloads.
#[derive(Debug, Clone)]
pub struct SupplierFaker {
    rng: DeterministicRng,
}

impl SupplierFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    pub fn supplier(&mut self) -> SupplierPayload {
        let trade = self.pick(&SUPPLIER_TRADES);
        let name = format!(
            "{} {} {}",
            self.pick(&SUPPLIER_ADJECTIVES),
            trade,
            self.pick(&SUPPLIER_SUFFIXES)
        );
        let slug = name
            .split_whitespace()
            .take(2)
            .collect::<Vec<_>>()
            .join("")
            .to_ascii_lowercase();
        let email = format!("orders@{slug}.{}", self.pick(&EMAIL_DOMAINS));
        let address = format!(
            "{} {} St, {}",
            self.int_range(100, 9_999),
            self.pick(&STREET_NAMES),
            self.pick(&CITIES)
        );
        // One in four suppliers has no phone on file.
        let phone_number = (self.rng.int_n(4) != 0).then(|| {
            format!(
                "({:03}) {:03}-{:04}",
                self.int_range(200, 999),
                self.int_range(200, 999),
                self.int_range(0, 9_999),
            )
        });

        SupplierPayload {
            name,
            email,
            address,
            phone_number,
            available: self.rng.int_n(5) != 0,
            products: Vec::new(),
        }
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn int_range(&mut self, min: u64, max: u64) -> u64 {
        if max <= min {
            return min;
        }
        min + self.rng.next_u64() % (max - min + 1)
    }
}
