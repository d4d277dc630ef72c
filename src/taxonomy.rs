//! The fixed classification taxonomies of the review.
//!
//! Each taxonomy maps a category name to the list of trigger keywords that
//! count a study towards it. The lists are process-wide configuration, not
//! derived from data, and their order is the reporting order.

/// One classification bucket and its trigger keywords.
#[derive(Debug, Clone)]
pub struct Category {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

/// A named, ordered set of categories.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    pub name: &'static str,
    pub categories: &'static [Category],
}

impl Taxonomy {
    pub fn category_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.categories.iter().map(|c| c.name)
    }
}

pub const METHODOLOGY: Taxonomy = Taxonomy {
    name: "Research Methodologies",
    categories: &[
        Category {
            name: "Theoretical/Conceptual",
            keywords: &[
                "theoretical",
                "conceptual",
                "framework",
                "model",
                "architecture",
                "proposed",
            ],
        },
        Category {
            name: "Experimental",
            keywords: &["experiment", "experimental", "test", "evaluation"],
        },
        Category {
            name: "Prototype/Implementation",
            keywords: &["prototype", "implementation", "deployed", "developed system"],
        },
        Category {
            name: "Simulation",
            keywords: &["simulation", "simulated", "simulate"],
        },
        Category {
            name: "Survey/Review",
            keywords: &["survey", "review", "systematic review", "literature"],
        },
    ],
};

pub const THEME: Taxonomy = Taxonomy {
    name: "Research Themes",
    categories: &[
        Category {
            name: "Security & Privacy",
            keywords: &[
                "security",
                "privacy",
                "authentication",
                "encryption",
                "attack",
                "vulnerability",
                "trust",
                "cyber",
            ],
        },
        Category {
            name: "Payment & Transaction Systems",
            keywords: &[
                "payment",
                "transaction",
                "billing",
                "cryptocurrency",
                "micropayment",
                "settlement",
            ],
        },
        Category {
            name: "Scalability & Performance",
            keywords: &[
                "scalability",
                "scalable",
                "performance",
                "throughput",
                "latency",
                "optimization",
            ],
        },
        Category {
            name: "Energy Trading",
            keywords: &[
                "energy trading",
                "peer-to-peer energy",
                "p2p energy",
                "energy market",
                "trading",
            ],
        },
        Category {
            name: "Sustainability",
            keywords: &[
                "sustainability",
                "sustainable",
                "carbon",
                "renewable",
                "green",
                "environmental",
            ],
        },
        Category {
            name: "Smart Contracts",
            keywords: &["smart contract"],
        },
        Category {
            name: "IoT Integration",
            keywords: &["iot", "internet of things", "sensor", "device"],
        },
        Category {
            name: "V2G/V2V Integration",
            keywords: &[
                "vehicle-to-grid",
                "v2g",
                "vehicle-to-vehicle",
                "v2v",
                "bidirectional",
            ],
        },
    ],
};

pub const APPLICATION_DOMAIN: Taxonomy = Taxonomy {
    name: "Application Domains",
    categories: &[
        Category {
            name: "Payment Systems",
            keywords: &["payment", "transaction", "billing", "financial"],
        },
        Category {
            name: "Charging Infrastructure Management",
            keywords: &[
                "charging infrastructure",
                "charging station",
                "charging network",
            ],
        },
        Category {
            name: "Energy Trading Platforms",
            keywords: &["energy trading", "trading platform", "energy market"],
        },
        Category {
            name: "Supply Chain Traceability",
            keywords: &[
                "supply chain",
                "traceability",
                "provenance",
                "battery lifecycle",
            ],
        },
        Category {
            name: "Authentication & Access Control",
            keywords: &["authentication", "access control", "authorization"],
        },
        Category {
            name: "Traffic Management",
            keywords: &["traffic", "routing", "navigation"],
        },
        Category {
            name: "V2G Operational Systems",
            keywords: &["v2g", "vehicle-to-grid operation"],
        },
    ],
};

pub const PLATFORM: Taxonomy = Taxonomy {
    name: "Blockchain Platforms",
    categories: &[
        Category {
            name: "Ethereum",
            keywords: &["ethereum"],
        },
        Category {
            name: "Hyperledger Fabric",
            keywords: &["hyperledger fabric", "hyperledger"],
        },
        Category {
            name: "Consortium/Private",
            keywords: &["consortium", "private blockchain", "permissioned"],
        },
        Category {
            name: "DAG-based",
            keywords: &["dag", "directed acyclic graph", "tangle", "iota"],
        },
    ],
};

pub const CHALLENGE: Taxonomy = Taxonomy {
    name: "Implementation Challenges",
    categories: &[
        Category {
            name: "Latency & Real-time Performance",
            keywords: &["latency", "real-time", "delay", "response time"],
        },
        Category {
            name: "Scalability Limitations",
            keywords: &[
                "scalability challenge",
                "scalability issue",
                "scalability limitation",
                "throughput limitation",
            ],
        },
        Category {
            name: "Energy Consumption",
            keywords: &[
                "energy consumption",
                "power consumption",
                "energy intensive",
                "computational cost",
            ],
        },
        Category {
            name: "Security Vulnerabilities",
            keywords: &[
                "security vulnerability",
                "security risk",
                "attack vector",
                "51% attack",
            ],
        },
        Category {
            name: "Regulatory Uncertainty",
            keywords: &["regulation", "regulatory", "policy", "legal", "compliance"],
        },
        Category {
            name: "Privacy Concerns",
            keywords: &["privacy concern", "privacy challenge", "data protection"],
        },
        Category {
            name: "Interoperability",
            keywords: &[
                "interoperability challenge",
                "interoperability issue",
                "compatibility",
            ],
        },
        Category {
            name: "Adoption Barriers",
            keywords: &["adoption barrier", "adoption challenge"],
        },
    ],
};

/// All five taxonomies in reporting order.
pub const ALL: [&Taxonomy; 5] = [
    &METHODOLOGY,
    &THEME,
    &APPLICATION_DOMAIN,
    &PLATFORM,
    &CHALLENGE,
];

/// The fixed keyword list for the exact (whole-word) frequency count.
/// Occurrences are counted per match, not per study.
pub const EXACT_COUNT_KEYWORDS: &[&str] = &[
    "blockchain",
    "electric vehicle",
    "ev",
    "charging",
    "smart contract",
    "security",
    "privacy",
    "energy trading",
    "v2g",
    "scalability",
    "payment",
    "authentication",
    "decentralized",
    "iot",
    "peer-to-peer",
];
