use crate::catalog::Record;

/// Text rendering of one record; the unit that gets embedded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub text: String,
}

/// Renders a record into the fixed labelled template. Pure and stable.
pub fn build_chunk(record: &Record) -> Chunk {
    let value = |field: &Option<String>| -> String {
        field
            .as_deref()
            .unwrap_or(crate::catalog::MISSING_VALUE)
            .to_string()
    };

    let text = format!(
        "Mobile Name: {}\nRAM: {}\nProcessor: {}\nBattery Capacity: {}\nScreen Size: {}\nPrice in India: {}",
        record.display_name(),
        value(&record.ram),
        value(&record.processor),
        value(&record.battery_capacity),
        value(&record.screen_size),
        value(&record.launched_price),
    );

    Chunk {
        text: text.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iphone() -> Record {
        Record {
            company_name: "Apple".to_string(),
            model_name: "iPhone 16 128GB".to_string(),
            ram: Some("8GB".to_string()),
            processor: Some("A18 Bionic".to_string()),
            battery_capacity: Some("3,561mAh".to_string()),
            screen_size: Some("6.1 inches".to_string()),
            launched_price: Some("INR 79,999".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn renders_labelled_template() {
        let chunk = build_chunk(&iphone());
        assert_eq!(
            chunk.text,
            "Mobile Name: Apple iPhone 16 128GB\n\
             RAM: 8GB\n\
             Processor: A18 Bionic\n\
             Battery Capacity: 3,561mAh\n\
             Screen Size: 6.1 inches\n\
             Price in India: INR 79,999"
        );
    }

    #[test]
    fn missing_values_use_sentinel() {
        let record = Record {
            company_name: "Nokia".to_string(),
            model_name: "3310".to_string(),
            ..Default::default()
        };
        let chunk = build_chunk(&record);
        assert!(chunk.text.contains("RAM: N/A"));
        assert!(chunk.text.ends_with("Price in India: N/A"));
    }

    #[test]
    fn rendering_is_stable() {
        assert_eq!(build_chunk(&iphone()), build_chunk(&iphone()));
    }
}
