//! Static indicator catalog.
//!
//! The proxy serves a fixed, hand-picked set of indicators grouped into
//! four categories. Labels are localized (Ukrainian) for the front end.

use crate::models::{Indicator, IndicatorCatalog, IndicatorCategory};

/// Build the indicator catalog.
pub fn indicators() -> IndicatorCatalog {
    use IndicatorCategory::*;

    IndicatorCatalog {
        economic: vec![
            Indicator::new("NY.GDP.MKTP.CD", "ВВП (поточна США $)", Economic),
            Indicator::new("NY.GDP.PCAP.CD", "ВВП на душу населення (США $)", Economic),
            Indicator::new("FP.CPI.TOTL.ZG", "Інфляція, ціни на споживача (% річних)", Economic),
            Indicator::new("GC.DOD.TOTL.GD.ZS", "Державний борг (% ВВП)", Economic),
        ],
        demographic: vec![
            Indicator::new("SP.POP.TOTL", "Населення, всього", Demographic),
            Indicator::new("SP.URB.TOTL.IN.ZS", "Міське населення (% від усього)", Demographic),
            Indicator::new("SP.DYN.CBRT.IN", "Народжуваність (на 1000 чол.)", Demographic),
            Indicator::new("SP.DYN.CDRT.IN", "Смертність (на 1000 чол.)", Demographic),
        ],
        social: vec![
            Indicator::new("SE.ADT.LITR.ZS", "Грамотність дорослого населення (% від 15+)", Social),
            Indicator::new("NY.ADJ.AEDU.GN.PER", "Середня тривалість навчання (років)", Social),
            Indicator::new("SL.UEM.TOTL.ZS", "Безробіття (% від загальної робочої сили)", Social),
            Indicator::new("EG.ELC.ACCS.ZS", "Доступ до електрики (% населення)", Social),
        ],
        environmental: vec![
            Indicator::new("EN.ATM.CO2E.KT", "Викиди CO₂ (млн т)", Environmental),
            Indicator::new("EN.ATM.CO2E.PC", "Викиди CO₂ на душу населення (т)", Environmental),
            Indicator::new(
                "EG.USE.COMM.FO.ZS",
                "Енергія від викопного палива (% від енергоспоживання)",
                Environmental,
            ),
            Indicator::new("AG.LND.FRST.ZS", "Лісова площа (% від земельної площі)", Environmental),
        ],
    }
}
