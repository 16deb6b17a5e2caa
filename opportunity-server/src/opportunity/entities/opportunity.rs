use {
    opportunity_api_types::opportunity as api,
    serde_json::Value,
    time::OffsetDateTime,
};

pub type Pair = api::Pair;
pub type Venue = api::Venue;
pub type UnixTimestamp = opportunity_api_types::UnixTimestamp;

/// Identity of an opportunity within its pair. Two missing venues are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct VenueKey {
    pub short_dex: Option<Venue>,
    pub long_dex:  Option<Venue>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OpportunityCreate {
    pub pair:       Option<Pair>,
    pub venues:     VenueKey,
    pub net_apr:    Option<Value>,
    pub risk_level: Option<Value>,
}

impl OpportunityCreate {
    /// The pair this record belongs to, if it has a usable one.
    pub fn get_pair(&self) -> Option<&Pair> {
        self.pair.as_ref().filter(|pair| !pair.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Opportunity {
    pub pair:       Pair,
    pub venues:     VenueKey,
    pub net_apr:    Option<Value>,
    pub risk_level: Option<Value>,
    pub timestamp:  UnixTimestamp,
}

impl Opportunity {
    /// Returns `None` for records without a pair.
    pub fn new_with_time(val: OpportunityCreate, time: OffsetDateTime) -> Option<Self> {
        let pair = val.get_pair()?.clone();
        Some(Self {
            pair,
            venues: val.venues,
            net_apr: val.net_apr,
            risk_level: val.risk_level,
            timestamp: time.unix_timestamp(),
        })
    }

    pub fn get_key(&self) -> &Pair {
        &self.pair
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Replaced,
}

impl From<api::OpportunityCreate> for OpportunityCreate {
    fn from(val: api::OpportunityCreate) -> Self {
        // Only strings name a pair. Anything else is dropped here and skipped on ingest.
        let pair = match val.pair {
            Some(Value::String(pair)) => Some(pair),
            _ => None,
        };
        Self {
            pair,
            venues:     VenueKey {
                short_dex: val.short_dex,
                long_dex:  val.long_dex,
            },
            net_apr:    val.net_apr,
            risk_level: val.risk_level,
        }
    }
}

impl From<Opportunity> for api::Opportunity {
    fn from(val: Opportunity) -> Self {
        Self {
            pair:       val.pair,
            short_dex:  val.venues.short_dex,
            long_dex:   val.venues.long_dex,
            net_apr:    val.net_apr,
            risk_level: val.risk_level,
            timestamp:  val.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        serde_json::json,
    };

    #[test]
    fn test_new_with_time_requires_non_empty_pair() {
        let time = OffsetDateTime::from_unix_timestamp(1_718_000_000).unwrap();
        let missing = OpportunityCreate::default();
        let empty = OpportunityCreate {
            pair: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(Opportunity::new_with_time(missing, time), None);
        assert_eq!(Opportunity::new_with_time(empty, time), None);
    }

    #[test]
    fn test_new_with_time_stamps_whole_seconds() {
        let time = OffsetDateTime::from_unix_timestamp(1_718_000_000).unwrap()
            + time::Duration::milliseconds(750);
        let opportunity = Opportunity::new_with_time(
            OpportunityCreate {
                pair: Some("BTC-USDT".to_string()),
                net_apr: Some(json!(5)),
                ..Default::default()
            },
            time,
        )
        .unwrap();
        assert_eq!(opportunity.timestamp, 1_718_000_000);
        assert_eq!(opportunity.get_key(), "BTC-USDT");
        assert_eq!(opportunity.net_apr, Some(json!(5)));
    }

    #[test]
    fn test_from_api_keeps_only_string_pairs() {
        let convert = |pair: Value| {
            OpportunityCreate::from(api::OpportunityCreate {
                pair: Some(pair),
                short_dex: Some("A".to_string()),
                ..Default::default()
            })
        };
        assert_eq!(convert(json!("BTC-USDT")).get_pair().map(String::as_str), Some("BTC-USDT"));
        assert_eq!(convert(json!("")).get_pair(), None);
        assert_eq!(convert(json!(0)).get_pair(), None);
        assert_eq!(convert(json!(false)).get_pair(), None);
        assert_eq!(convert(json!(7)).pair, None);
        assert_eq!(convert(json!(0)).venues.short_dex.as_deref(), Some("A"));
    }
}
