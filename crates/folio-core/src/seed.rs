//! Built-in portfolio content.
//!
//! Hand-authored data compiled into the binary. A data file passed to the
//! app replaces it wholesale.

use crate::catalogue::CatalogueData;
use crate::records::{
    Certification, CertificationStatus, Chart, ChartKind, DataTable, Experience, Link, Metric,
    Profile, Project, Series, SkillCategory, SkillEntry,
};
use crate::{RecordId, Row};
use std::collections::BTreeSet;

fn tags(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn metric(label: &str, value: &str) -> Metric {
    Metric {
        label: label.to_string(),
        value: value.to_string(),
    }
}

fn series(name: &str, values: &[f64]) -> Series {
    Series {
        name: name.to_string(),
        values: values.to_vec(),
    }
}

fn skill(name: &str, level: u8) -> SkillEntry {
    SkillEntry {
        name: name.to_string(),
        level,
    }
}

pub(crate) fn portfolio() -> CatalogueData {
    CatalogueData {
        profile: profile(),
        projects: vec![
            home_depot_dcf(),
            fixed_income(),
            portfolio_optimization(),
            lbo_model(),
            market_entry(),
        ],
        certifications: certifications(),
        experiences: experiences(),
        skills: skills_matrix(),
    }
}

fn profile() -> Profile {
    Profile {
        name: "Jordan Avery".to_string(),
        headline: "Financial Analyst · Valuation & Portfolio Strategy".to_string(),
        location: "New York, NY".to_string(),
        email: "hello@jordanavery.dev".to_string(),
        summary: "Analyst focused on fundamental valuation, fixed income and \
                  quantitative portfolio construction. Builds models that \
                  survive contact with the investment committee."
            .to_string(),
        links: vec![
            Link {
                label: "LinkedIn".to_string(),
                url: "https://www.linkedin.com/in/jordan-avery".to_string(),
            },
            Link {
                label: "GitHub".to_string(),
                url: "https://github.com/jordan-avery".to_string(),
            },
        ],
    }
}

// =============================================================================
// PROJECTS
// =============================================================================

fn home_depot_dcf() -> Project {
    let cash_flow = DataTable {
        slug: "cash-flow".to_string(),
        title: "Projected Free Cash Flow".to_string(),
        columns: strings(&[
            "Year",
            "Revenue ($B)",
            "EBITDA ($B)",
            "FCF ($B)",
            "PV of FCF ($B)",
        ]),
        rows: vec![
            Row::new()
                .with("Year", "2024E")
                .with("Revenue ($B)", 159.2)
                .with("EBITDA ($B)", 23.9)
                .with("FCF ($B)", 15.1)
                .with("PV of FCF ($B)", 14.0),
            Row::new()
                .with("Year", "2025E")
                .with("Revenue ($B)", 166.4)
                .with("EBITDA ($B)", 25.0)
                .with("FCF ($B)", 16.2)
                .with("PV of FCF ($B)", 13.9),
            Row::new()
                .with("Year", "2026E")
                .with("Revenue ($B)", 173.9)
                .with("EBITDA ($B)", 26.1)
                .with("FCF ($B)", 17.3)
                .with("PV of FCF ($B)", 13.8),
            Row::new()
                .with("Year", "2027E")
                .with("Revenue ($B)", 181.8)
                .with("EBITDA ($B)", 27.3)
                .with("FCF ($B)", 18.4)
                .with("PV of FCF ($B)", 13.6),
            Row::new()
                .with("Year", "2028E")
                .with("Revenue ($B)", 190.0)
                .with("EBITDA ($B)", 28.5)
                .with("FCF ($B)", 19.6)
                .with("PV of FCF ($B)", 13.4),
            Row::new()
                .with("Year", "Terminal")
                .with("Revenue ($B)", "-")
                .with("EBITDA ($B)", "-")
                .with("FCF ($B)", 410.6)
                .with("PV of FCF ($B)", 280.1),
        ],
    };

    let assumptions = DataTable {
        slug: "assumptions".to_string(),
        title: "Key Assumptions".to_string(),
        columns: strings(&["Assumption", "Value"]),
        rows: vec![
            Row::new().with("Assumption", "WACC").with("Value", "8.4%"),
            Row::new()
                .with("Assumption", "Terminal growth")
                .with("Value", "2.5%"),
            Row::new().with("Assumption", "Tax rate").with("Value", "24.0%"),
            Row::new()
                .with("Assumption", "Shares outstanding (B)")
                .with("Value", 0.99),
        ],
    };

    Project {
        id: RecordId(1),
        title: "Home Depot DCF Valuation".to_string(),
        category: "Valuation".to_string(),
        summary: "Five-year discounted cash flow model with terminal value \
                  and sensitivity analysis."
            .to_string(),
        description: "Built a three-statement driven DCF for The Home Depot, \
                      projecting revenue from comparable-store growth and new \
                      store openings, and discounting unlevered free cash flow \
                      at a bottom-up WACC."
            .to_string(),
        industry: "Retail".to_string(),
        skills: tags(&[
            "DCF Modeling",
            "Excel",
            "Financial Statement Analysis",
            "Valuation",
        ]),
        tools: tags(&["Bloomberg Terminal", "Excel"]),
        metrics: vec![
            metric("Implied share price", "$412"),
            metric("Upside", "11.3%"),
            metric("WACC", "8.4%"),
        ],
        tables: vec![cash_flow, assumptions],
        charts: vec![Chart {
            title: "Revenue and Free Cash Flow".to_string(),
            kind: ChartKind::Bar,
            labels: strings(&["2024E", "2025E", "2026E", "2027E", "2028E"]),
            series: vec![
                series("Revenue ($B)", &[159.2, 166.4, 173.9, 181.8, 190.0]),
                series("FCF ($B)", &[15.1, 16.2, 17.3, 18.4, 19.6]),
            ],
        }],
    }
}

fn fixed_income() -> Project {
    Project {
        id: RecordId(2),
        title: "Fixed Income Portfolio Analysis".to_string(),
        category: "Financial Model".to_string(),
        summary: "Duration-matched bond portfolio with rate shock scenarios.".to_string(),
        description: "Constructed an investment-grade bond portfolio targeting \
                      a five-year duration and stress-tested it against \
                      parallel and twisting yield curve shocks."
            .to_string(),
        industry: "Asset Management".to_string(),
        skills: tags(&[
            "Duration Analysis",
            "Excel",
            "Fixed Income",
            "Portfolio Optimization",
        ]),
        tools: tags(&["Excel", "Python"]),
        metrics: vec![
            metric("Portfolio duration", "5.1"),
            metric("Yield to maturity", "4.9%"),
        ],
        tables: vec![DataTable {
            slug: "holdings".to_string(),
            title: "Bond Holdings".to_string(),
            columns: strings(&["Bond", "Coupon (%)", "Maturity", "Duration", "Weight (%)"]),
            rows: vec![
                Row::new()
                    .with("Bond", "UST 4.25% 2029")
                    .with("Coupon (%)", 4.25)
                    .with("Maturity", 2029.0)
                    .with("Duration", 4.4)
                    .with("Weight (%)", 30.0),
                Row::new()
                    .with("Bond", "AAPL 3.35% 2032")
                    .with("Coupon (%)", 3.35)
                    .with("Maturity", 2032.0)
                    .with("Duration", 6.8)
                    .with("Weight (%)", 25.0),
                Row::new()
                    .with("Bond", "JPM 5.04% 2028")
                    .with("Coupon (%)", 5.04)
                    .with("Maturity", 2028.0)
                    .with("Duration", 3.5)
                    .with("Weight (%)", 25.0),
                Row::new()
                    .with("Bond", "MSFT 2.4% 2030")
                    .with("Coupon (%)", 2.4)
                    .with("Maturity", 2030.0)
                    .with("Duration", 5.6)
                    .with("Weight (%)", 20.0),
            ],
        }],
        charts: vec![Chart {
            title: "Price Change Under Rate Shocks".to_string(),
            kind: ChartKind::Line,
            labels: strings(&["-200bp", "-100bp", "0bp", "+100bp", "+200bp"]),
            series: vec![series("Portfolio (%)", &[10.6, 5.2, 0.0, -5.0, -9.7])],
        }],
    }
}

fn portfolio_optimization() -> Project {
    Project {
        id: RecordId(3),
        title: "Portfolio Optimization".to_string(),
        category: "Financial Model".to_string(),
        summary: "Mean-variance efficient frontier across six asset classes.".to_string(),
        description: "Estimated expected returns and covariances from ten \
                      years of monthly data and solved for the tangency \
                      portfolio under long-only constraints."
            .to_string(),
        industry: "Asset Management".to_string(),
        skills: tags(&["Portfolio Optimization", "Python", "Risk Management"]),
        tools: tags(&["Python", "pandas"]),
        metrics: vec![
            metric("Max Sharpe ratio", "0.87"),
            metric("Asset classes", "6"),
        ],
        tables: vec![DataTable {
            slug: "frontier".to_string(),
            title: "Efficient Frontier Portfolios".to_string(),
            columns: strings(&[
                "Portfolio",
                "Expected Return (%)",
                "Volatility (%)",
                "Sharpe Ratio",
            ]),
            rows: vec![
                Row::new()
                    .with("Portfolio", "Minimum variance")
                    .with("Expected Return (%)", 5.1)
                    .with("Volatility (%)", 6.2)
                    .with("Sharpe Ratio", 0.5),
                Row::new()
                    .with("Portfolio", "Tangency")
                    .with("Expected Return (%)", 7.9)
                    .with("Volatility (%)", 8.4)
                    .with("Sharpe Ratio", 0.87),
                Row::new()
                    .with("Portfolio", "Equal weight")
                    .with("Expected Return (%)", 6.8)
                    .with("Volatility (%)", 9.9)
                    .with("Sharpe Ratio", 0.63),
                Row::new()
                    .with("Portfolio", "Max return")
                    .with("Expected Return (%)", 9.6)
                    .with("Volatility (%)", 15.8)
                    .with("Sharpe Ratio", 0.57),
            ],
        }],
        charts: vec![Chart {
            title: "Tangency Portfolio Allocation".to_string(),
            kind: ChartKind::Pie,
            labels: strings(&[
                "US Equity",
                "Intl Equity",
                "EM Equity",
                "Treasuries",
                "Corporates",
                "REITs",
            ]),
            series: vec![series("Weight (%)", &[32.0, 14.0, 6.0, 28.0, 15.0, 5.0])],
        }],
    }
}

fn lbo_model() -> Project {
    Project {
        id: RecordId(4),
        title: "Leveraged Buyout Model".to_string(),
        category: "Financial Model".to_string(),
        summary: "Five-year LBO of a mid-market industrial with a full debt schedule."
            .to_string(),
        description: "Modeled a sponsor acquisition at 9.5x EBITDA funded with \
                      senior and subordinated debt, including cash sweep and \
                      returns attribution."
            .to_string(),
        industry: "Private Equity".to_string(),
        skills: tags(&["Debt Scheduling", "Excel", "LBO Modeling"]),
        tools: tags(&["Excel"]),
        metrics: vec![metric("Base case IRR", "22.4%"), metric("MOIC", "2.7x")],
        tables: vec![DataTable {
            slug: "returns".to_string(),
            title: "Returns by Exit Multiple".to_string(),
            columns: strings(&["Exit Multiple", "IRR (%)", "MOIC"]),
            rows: vec![
                Row::new()
                    .with("Exit Multiple", "8.5x")
                    .with("IRR (%)", 18.1)
                    .with("MOIC", 2.3),
                Row::new()
                    .with("Exit Multiple", "9.5x")
                    .with("IRR (%)", 22.4)
                    .with("MOIC", 2.7),
                Row::new()
                    .with("Exit Multiple", "10.5x")
                    .with("IRR (%)", 26.0)
                    .with("MOIC", 3.2),
            ],
        }],
        charts: vec![Chart {
            title: "Net Debt Paydown".to_string(),
            kind: ChartKind::Area,
            labels: strings(&["Y0", "Y1", "Y2", "Y3", "Y4", "Y5"]),
            series: vec![series("Net debt ($M)", &[620.0, 571.0, 512.0, 447.0, 371.0, 288.0])],
        }],
    }
}

fn market_entry() -> Project {
    Project {
        id: RecordId(5),
        title: "Southeast Asia Market Entry Strategy".to_string(),
        category: "Strategy".to_string(),
        summary: "Case study sizing the opportunity for a beverage brand entering Vietnam."
            .to_string(),
        description: "Combined top-down and bottom-up market sizing with a \
                      competitive landscape review to recommend a phased \
                      distributor-led entry."
            .to_string(),
        industry: "Consumer Goods".to_string(),
        skills: tags(&["Competitive Analysis", "Market Sizing"]),
        tools: tags(&["Excel", "PowerPoint"]),
        metrics: vec![
            metric("Addressable market", "$1.8B"),
            metric("Year-5 share target", "3%"),
        ],
        tables: vec![DataTable {
            slug: "market-sizing".to_string(),
            title: "Market Sizing by Channel".to_string(),
            columns: strings(&["Channel", "Market ($M)", "Growth (%)"]),
            rows: vec![
                Row::new()
                    .with("Channel", "Modern trade")
                    .with("Market ($M)", 640.0)
                    .with("Growth (%)", 9.5),
                Row::new()
                    .with("Channel", "Traditional trade")
                    .with("Market ($M)", 910.0)
                    .with("Growth (%)", 3.1),
                Row::new()
                    .with("Channel", "E-commerce")
                    .with("Market ($M)", 250.0)
                    .with("Growth (%)", 21.4),
            ],
        }],
        charts: vec![],
    }
}

// =============================================================================
// CERTIFICATIONS, EXPERIENCE, SKILLS
// =============================================================================

fn certifications() -> Vec<Certification> {
    vec![
        Certification {
            id: RecordId(1),
            name: "CFA Level I".to_string(),
            issuer: "CFA Institute".to_string(),
            year: 2023,
            status: CertificationStatus::Completed,
            skills: tags(&["Fixed Income", "Financial Statement Analysis", "Valuation"]),
        },
        Certification {
            id: RecordId(2),
            name: "CFA Level II".to_string(),
            issuer: "CFA Institute".to_string(),
            year: 2025,
            status: CertificationStatus::InProgress,
            skills: tags(&["Portfolio Optimization", "Valuation"]),
        },
        Certification {
            id: RecordId(3),
            name: "Financial Modeling & Valuation Analyst (FMVA)".to_string(),
            issuer: "Corporate Finance Institute".to_string(),
            year: 2022,
            status: CertificationStatus::Completed,
            skills: tags(&["DCF Modeling", "Excel", "LBO Modeling"]),
        },
        Certification {
            id: RecordId(4),
            name: "Bloomberg Market Concepts".to_string(),
            issuer: "Bloomberg".to_string(),
            year: 2021,
            status: CertificationStatus::Completed,
            skills: tags(&["Fixed Income"]),
        },
    ]
}

fn experiences() -> Vec<Experience> {
    vec![
        Experience {
            id: RecordId(1),
            role: "Equity Research Intern".to_string(),
            organisation: "Meridian Securities".to_string(),
            location: "Boston, MA".to_string(),
            start: "2021-06".to_string(),
            end: Some("2021-08".to_string()),
            industry: "Equity Research".to_string(),
            highlights: strings(&[
                "Maintained earnings models for eight consumer retail names",
                "Drafted initiation sections on store-level unit economics",
            ]),
            skills: tags(&["Financial Statement Analysis", "Valuation"]),
            tools: tags(&["Bloomberg Terminal", "Excel"]),
        },
        Experience {
            id: RecordId(2),
            role: "Investment Banking Summer Analyst".to_string(),
            organisation: "Harlow & Pierce".to_string(),
            location: "New York, NY".to_string(),
            start: "2022-06".to_string(),
            end: Some("2022-08".to_string()),
            industry: "Investment Banking".to_string(),
            highlights: strings(&[
                "Built merger consequence and LBO analyses for two live sell-side mandates",
                "Prepared comparable company and precedent transaction sets",
            ]),
            skills: tags(&["DCF Modeling", "LBO Modeling", "Valuation"]),
            tools: tags(&["Excel", "PowerPoint"]),
        },
        Experience {
            id: RecordId(3),
            role: "Financial Analyst".to_string(),
            organisation: "Northbridge Capital".to_string(),
            location: "New York, NY".to_string(),
            start: "2023-07".to_string(),
            end: None,
            industry: "Asset Management".to_string(),
            highlights: strings(&[
                "Own the duration and credit risk reporting for a $2.1B fixed income sleeve",
                "Automated monthly attribution in Python, cutting turnaround from days to hours",
            ]),
            skills: tags(&["Fixed Income", "Portfolio Optimization", "Risk Management"]),
            tools: tags(&["Bloomberg Terminal", "Python", "SQL"]),
        },
    ]
}

fn skills_matrix() -> Vec<SkillCategory> {
    vec![
        SkillCategory {
            id: RecordId(1),
            name: "Financial Modeling".to_string(),
            entries: vec![
                skill("Three-statement models", 5),
                skill("DCF", 5),
                skill("LBO", 4),
            ],
        },
        SkillCategory {
            id: RecordId(2),
            name: "Valuation".to_string(),
            entries: vec![
                skill("Comparable companies", 4),
                skill("Precedent transactions", 3),
                skill("Sum of the parts", 3),
            ],
        },
        SkillCategory {
            id: RecordId(3),
            name: "Data & Programming".to_string(),
            entries: vec![skill("Python", 4), skill("SQL", 3), skill("VBA", 3)],
        },
        SkillCategory {
            id: RecordId(4),
            name: "Platforms".to_string(),
            entries: vec![
                skill("Excel", 5),
                skill("Bloomberg Terminal", 4),
                skill("Power BI", 3),
            ],
        },
    ]
}
