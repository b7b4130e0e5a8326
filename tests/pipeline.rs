use approx::assert_relative_eq;
use polars::prelude::*;

use lci_balance::schema::output;
use lci_balance::{
    BalanceConfig, BalanceError, CompoundSpec, FlowType, MassBalance, MolarMassTable,
    ReferenceData,
};

const H: f64 = 1.008;
const C: f64 = 12.011;
const O: f64 = 15.999;

fn elementary_table() -> DataFrame {
    df!(
        "Name" => [
            "Water, unspecified natural origin",
            "Carbon dioxide, fossil",
            "COD, Chemical Oxygen Demand",
            "Water, river",
            "Particulates, > 10 um",
        ],
        "Amount" => ["10", "4", "7", "0.002", "2"],
        "Unit" => ["kg", "kg", "kg", "m3", "kg"],
        "Flow Type" => ["Input", "Output", "Output", "Input", "Output"],
        "Compartment" => ["natural resource", "air", "water", "natural resource", "air"],
        "Subcompartment" => ["in water", "unspecified", "surface water", "in water", "unspecified"],
        "carbon content (dimensionless)" => ["", "", "", "", "0.3"]
    )
    .unwrap()
}

fn f64_at(df: &DataFrame, column: &str, row: usize) -> f64 {
    df.column(column).unwrap().f64().unwrap().get(row).unwrap()
}

fn str_at<'a>(df: &'a DataFrame, column: &str, row: usize) -> &'a str {
    df.column(column).unwrap().str().unwrap().get(row).unwrap()
}

fn row_balance(df: &DataFrame, reference: &ReferenceData, row: usize) -> f64 {
    let elements: f64 = reference
        .elements()
        .iter()
        .map(|e| f64_at(df, e.symbol, row))
        .sum();
    elements + f64_at(df, output::REST, row)
}

#[test]
fn elementary_groups_balance_to_one() {
    let engine = MassBalance::standard().unwrap();
    let run = engine.run_elementary(elementary_table()).unwrap();
    let df = &run.table;

    assert_eq!(df.height(), 2);
    assert_eq!(run.summary.rows_excluded, 1);
    assert_eq!(run.summary.unconverted_volumes, 0);
    assert_relative_eq!(run.summary.total_mass, 18.0, epsilon = 1e-9);

    for row in 0..df.height() {
        assert_relative_eq!(row_balance(df, engine.reference(), row), 1.0, epsilon = 1e-9);
    }

    // kg rows are grouped before the converted m3 rows, so the water group comes first
    assert_eq!(
        str_at(df, output::FLOW_NAME, 0),
        "Input Elementary flow from natural resource, in water"
    );
    assert_relative_eq!(f64_at(df, output::AMOUNT, 0), 12.0, epsilon = 1e-9);
    assert_relative_eq!(f64_at(df, "H", 0), 2.0 * H / (2.0 * H + O), epsilon = 1e-12);
    assert_relative_eq!(f64_at(df, output::REST, 0), 0.0, epsilon = 1e-12);

    assert_eq!(str_at(df, output::FLOW_NAME, 1), "Output Elementary flow to air, unspecified");
    assert_eq!(str_at(df, output::SUB_PROCESS, 1), "No information");
    assert_eq!(str_at(df, output::UNIT, 1), "kg");
    let co2 = C + 2.0 * O;
    let carbon = (4.0 * C / co2 + 2.0 * 0.3) / 6.0;
    assert_relative_eq!(f64_at(df, "C", 1), carbon, epsilon = 1e-12);
    assert_relative_eq!(f64_at(df, output::REST, 1), 2.0 * 0.7 / 6.0, epsilon = 1e-12);
}

#[test]
fn zero_amount_group_is_all_zero() {
    let df = df!(
        "Name" => ["Nitrogen oxides", "Sulfur dioxide"],
        "Amount" => ["0", "not reported"],
        "Unit" => ["kg", "kg"],
        "Flow Type" => ["Output", "Output"],
        "Compartment" => ["air", "air"],
        "Subcompartment" => ["urban air close to ground", "urban air close to ground"]
    )
    .unwrap();
    let engine = MassBalance::standard().unwrap();
    let run = engine.run_elementary(df).unwrap();

    assert_eq!(run.records.len(), 1);
    let record = &run.records[0];
    assert_eq!(record.amount, 0.0);
    assert!(record.fractions.iter().all(|&f| f == 0.0));
    assert_eq!(record.rest, 0.0);
}

#[test]
fn non_water_volume_is_reported_not_converted() {
    let df = df!(
        "Name" => ["Gas, natural, in ground"],
        "Amount" => ["2"],
        "Unit" => ["m3"],
        "Flow Type" => ["Input"],
        "Compartment" => ["natural resource"],
        "Subcompartment" => ["in ground"]
    )
    .unwrap();
    let engine = MassBalance::standard().unwrap();
    let run = engine.run_elementary(df).unwrap();

    assert_eq!(run.summary.unconverted_volumes, 1);
    assert_eq!(run.records[0].amount, 2.0);
}

#[test]
fn grouping_is_reproducible() {
    let engine = MassBalance::standard().unwrap();
    let first = engine.run_elementary(elementary_table()).unwrap();
    let second = engine.run_elementary(elementary_table()).unwrap();
    assert_eq!(first.records, second.records);
    assert!(first.table.equals(&second.table));
}

fn intermediate_table() -> DataFrame {
    df!(
        "Name" => ["Wood chips, wet", "Tap water", "Charcoal"],
        "Amount" => ["-2", "0.5", "1"],
        "Unit" => ["kg", "m3", "kg"],
        "Flow Type" => ["Input", "Input", "Input"],
        "Compartment" => ["Technosphere", "Technosphere", "Technosphere"],
        "Subcompartment" => ["RER", "CH", "GLO"],
        "carbon content (dimensionless)" => ["0.5", "", "0.9"],
        "dry mass (kg)" => ["0.8", "", "2.0"],
        "wet mass (kg)" => ["", "1000", ""],
        "water content (dimensionless)" => ["0.25", "", ""]
    )
    .unwrap()
}

#[test]
fn intermediate_rows_flip_convert_and_clamp() {
    let engine = MassBalance::standard().unwrap();
    let run = engine.run_intermediate(intermediate_table()).unwrap();
    let records = &run.records;
    let r = engine.reference();
    let idx = |s: &str| r.index_of_symbol(s).unwrap();

    assert_eq!(records.len(), 3);
    let names: Vec<&str> = records.iter().map(|o| o.flow_name.as_str()).collect();
    assert_eq!(names, vec!["Wood chips, wet", "Charcoal", "Tap water"]);

    let wood = &records[0];
    assert_eq!(wood.amount, 2.0);
    assert_eq!(wood.flow_type, FlowType::Output);
    let h2o = 2.0 * H + O;
    assert_relative_eq!(wood.fractions[idx("C")], 0.4, epsilon = 1e-12);
    assert_relative_eq!(wood.fractions[idx("H")], 0.2 * 2.0 * H / h2o, epsilon = 1e-12);
    assert_relative_eq!(wood.fractions[idx("O")], 0.2 * O / h2o, epsilon = 1e-12);
    assert_relative_eq!(wood.rest, 0.4, epsilon = 1e-12);
    assert_relative_eq!(wood.fraction_sum() + wood.rest, 1.0, epsilon = 1e-9);

    let charcoal = &records[1];
    assert_relative_eq!(charcoal.fractions[idx("C")], 1.8, epsilon = 1e-12);
    assert_eq!(charcoal.rest, 0.0);

    let water = &records[2];
    assert_relative_eq!(water.amount, 500.0, epsilon = 1e-9);
    assert_eq!(water.unit.as_str(), "kg");
    assert_eq!(water.rest, 1.0);
}

#[test]
fn dispatch_by_exchange_type() {
    let engine = MassBalance::standard().unwrap();
    let elementary = engine.process("elementary", elementary_table()).unwrap();
    assert_eq!(elementary.height(), 2);
    let intermediate = engine.process("intermediate", intermediate_table()).unwrap();
    assert_eq!(intermediate.height(), 3);

    let err = engine.process("biosphere", elementary_table()).unwrap_err();
    assert!(matches!(err, BalanceError::UnknownExchangeType(_)));
}

#[test]
fn both_exchange_tables_at_once() {
    let engine = MassBalance::standard().unwrap();
    let (intermediate, elementary) = engine
        .process_exchanges(intermediate_table(), elementary_table())
        .unwrap();
    assert_eq!(intermediate.height(), 3);
    assert_eq!(elementary.height(), 2);
    assert_eq!(
        *elementary.get_column_names_str().last().unwrap(),
        output::REST
    );
}

#[test]
fn custom_compound_table() {
    let reference = ReferenceData::new(
        MolarMassTable::standard(),
        &[CompoundSpec::new("Methane", &[("carbon", 1), ("hydrogen", 4)])],
    )
    .unwrap();
    let engine = MassBalance::new(reference, BalanceConfig::default());
    let df = df!(
        "Name" => ["Methane, fossil", "Carbon dioxide, fossil"],
        "Amount" => [16.0, 4.0],
        "Unit" => ["kg", "kg"],
        "Flow Type" => ["Output", "Output"],
        "Compartment" => ["air", "air"],
        "Subcompartment" => ["unspecified", "unspecified"]
    )
    .unwrap();
    let run = engine.run_elementary(df).unwrap();
    let r = engine.reference();

    // carbon dioxide is not in this table, so its mass lands in rest
    let carbon = 16.0 * C / (C + 4.0 * H) / 20.0;
    assert_relative_eq!(run.records[0].fractions[r.index_of_symbol("C").unwrap()], carbon, epsilon = 1e-12);
    assert_relative_eq!(run.records[0].rest, 0.2, epsilon = 1e-12);
}
