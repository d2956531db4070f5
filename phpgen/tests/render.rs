//! End-to-end rendering of whole files and declarations.

use eyre::Result;
use phpgen::prelude::*;
use phpgen::{NameKind, tag_name};

fn point_file() -> Result<File> {
    let mut file = File::new();
    let class = file.add_class("Geo\\Point")?;
    let constructor = class.add_method(Method::new("__construct")?)?;
    constructor.add_promoted_parameter("x")?.ty = "float".into();
    constructor.add_promoted_parameter("y")?.ty = "float".into();
    class.add_method(
        Method::new("length")?
            .returns("float")
            .body("return sqrt($this->x ** 2 + $this->y ** 2);"),
    )?;
    Ok(file)
}

#[test]
fn test_point_renders_in_order() -> Result<()> {
    let code = Printer::default().print_file(&point_file()?)?;

    let markers = [
        "namespace Geo;",
        "class Point",
        "public function __construct(\n\t\tpublic float $x,\n\t\tpublic float $y,\n\t) {",
        "public function length(): float\n\t{\n\t\treturn sqrt($this->x ** 2 + $this->y ** 2);\n\t}",
    ];
    let mut from = 0;
    for marker in markers {
        let at = code[from..]
            .find(marker)
            .ok_or_else(|| eyre::eyre!("missing {marker:?} in:\n{code}"))?;
        from += at + marker.len();
    }
    Ok(())
}

#[test]
fn test_point_default_layout() -> Result<()> {
    let code = Printer::default().print_file(&point_file()?)?;
    assert_eq!(
        code,
        "<?php\n\
         \n\
         namespace Geo;\n\
         \n\
         class Point\n\
         {\n\
         \tpublic function __construct(\n\
         \t\tpublic float $x,\n\
         \t\tpublic float $y,\n\
         \t) {\n\
         \t}\n\
         \n\
         \n\
         \tpublic function length(): float\n\
         \t{\n\
         \t\treturn sqrt($this->x ** 2 + $this->y ** 2);\n\
         \t}\n\
         }\n"
    );
    Ok(())
}

#[test]
fn test_point_psr_layout() -> Result<()> {
    let code = Printer::psr().print_file(&point_file()?)?;
    insta::assert_snapshot!(code, @r#"
<?php

namespace Geo;

class Point
{
    public function __construct(
        public float $x,
        public float $y,
    ) {
    }

    public function length(): float
    {
        return sqrt($this->x ** 2 + $this->y ** 2);
    }
}
"#);
    Ok(())
}

#[test]
fn test_rendering_is_idempotent() -> Result<()> {
    let file = point_file()?;
    let printer = Printer::default();
    assert_eq!(printer.print_file(&file)?, printer.print_file(&file)?);
    Ok(())
}

#[test]
fn test_enum_backing_is_inferred_on_next_render() -> Result<()> {
    let printer = Printer::default();
    let mut suit = Enum::new("Suit")?;
    for name in ["Hearts", "Spades", "Clubs"] {
        suit.add_case(EnumCase::new(name)?)?;
    }

    let code = printer.print_class(&suit.clone().into(), None)?;
    assert!(code.starts_with("enum Suit\n{\n"));
    assert!(!code.contains(": "));

    // a single valued case makes the enum backed, so every case needs a value
    suit.add_case(EnumCase::new("Joker")?.value(0))?;
    assert!(printer.print_class(&suit.clone().into(), None).is_err());

    for (value, name) in (1_i64..).zip(["Hearts", "Spades", "Clubs"]) {
        suit.cases.get_mut(name)?.value = Some(value.into());
    }
    let code = printer.print_class(&suit.into(), None)?;
    assert!(code.starts_with("enum Suit: int\n{\n"));
    assert!(code.contains("\tcase Hearts = 1;\n"));
    assert!(code.contains("\tcase Joker = 0;\n"));
    Ok(())
}

fn wrap_printer(wrap_length: usize) -> Printer {
    Printer::new(PrinterConfig {
        wrap_length,
        ..PrinterConfig::default()
    })
}

#[test]
fn test_parameters_wrap_exactly_past_budget() -> Result<()> {
    let function = Function::new("f")?
        .param(Parameter::new("alpha")?.ty("string"))?
        .param(Parameter::new("beta")?.ty("string"))?;
    let signature = "function f(string $alpha, string $beta)";

    let fits = wrap_printer(signature.len()).print_function(&function, None)?;
    assert_eq!(fits, format!("{signature}\n{{\n}}\n"));

    let over = wrap_printer(signature.len() - 1).print_function(&function, None)?;
    assert_eq!(over, "function f(\n\tstring $alpha,\n\tstring $beta,\n) {\n}\n");
    Ok(())
}

#[test]
fn test_method_wrap_counts_class_indentation() -> Result<()> {
    let method = Method::new("g")?
        .param(Parameter::new("a")?.ty("int"))?
        .returns("int");
    let line = "public function g(int $a): int";

    // one tab of class indentation precedes the signature
    let fits = wrap_printer(line.len() + 1).print_method(&method, None, false)?;
    assert!(fits.starts_with(&format!("{line}\n")));

    let over = wrap_printer(line.len()).print_method(&method, None, false)?;
    assert!(over.starts_with("public function g(\n\tint $a,\n): int\n{"));
    Ok(())
}

#[test]
fn test_full_file_psr() -> Result<()> {
    let mut file = File::new().strict_types();
    let namespace = file.add_namespace("App\\Billing")?;
    namespace.add_use("Psr\\Log\\LoggerInterface", None)?;

    let invoice = namespace.add_class(
        Class::new("Invoice")?
            .final_()
            .implement("JsonSerializable")?,
    )?;
    invoice.add_constant(Constant::new("CURRENCY", "EUR")?.visibility(Visibility::Public))?;
    invoice.add_method(
        Method::new("__construct")?
            .param(
                Parameter::new("logger")?
                    .ty("Psr\\Log\\LoggerInterface")
                    .promote(Visibility::Private)
                    .readonly(),
            )?
            .param(Parameter::new("lines")?.ty("array").default(Array::new()))?,
    )?;
    invoice.add_method(
        Method::new("jsonSerialize")?
            .returns("array")
            .body("return ['currency' => self::CURRENCY];"),
    )?;

    namespace.add_enum(
        Enum::new("Status")?
            .with_case(EnumCase::new("Open")?.value("open"))?
            .with_case(EnumCase::new("Paid")?.value("paid"))?,
    )?;

    let code = Printer::psr().print_file(&file)?;
    insta::assert_snapshot!(code, @r#"
<?php

declare(strict_types=1);

namespace App\Billing;

use Psr\Log\LoggerInterface;

final class Invoice implements \JsonSerializable
{
    public const CURRENCY = 'EUR';

    public function __construct(
        private readonly LoggerInterface $logger,
        array $lines = [],
    ) {
    }

    public function jsonSerialize(): array
    {
        return ['currency' => self::CURRENCY];
    }
}

enum Status: string
{
    case Open = 'open';
    case Paid = 'paid';
}
"#);
    Ok(())
}

#[test]
fn test_tagged_names_follow_target_namespace() -> Result<()> {
    let body = format!(
        "return new {}({}());",
        tag_name("App\\Models\\User", NameKind::Type),
        tag_name("App\\Support\\uuid", NameKind::Function),
    );
    let function = Function::new("make")?.body(body);

    let mut models = Namespace::new("App\\Models")?;
    models.add_use_function("App\\Support\\uuid", None)?;
    let code = Printer::default().print_function(&function, Some(&models))?;
    assert!(code.contains("\treturn new User(uuid());\n"));

    let code = Printer::default().print_function(&function, None)?;
    assert!(code.contains("\treturn new App\\Models\\User(App\\Support\\uuid());\n"));
    Ok(())
}

#[test]
fn test_unresolved_printing_keeps_names() -> Result<()> {
    let mut file = File::new();
    file.add_namespace("App")?.add_use("Vendor\\Clock", None)?;
    file.add_class("App\\Job")?
        .add_method(Method::new("clock")?.returns("Vendor\\Clock"))?;

    let config = PrinterConfig {
        resolve_types: false,
        ..PrinterConfig::default()
    };
    let code = Printer::new(config).print_file(&file)?;
    assert!(code.contains("use Vendor\\Clock;\n"));
    assert!(code.contains("public function clock(): Vendor\\Clock\n"));
    Ok(())
}

#[test]
fn test_config_loaded_from_toml() -> Result<()> {
    let config = PrinterConfig::from_toml_str(
        r#"
indentation = { spaces = 2 }
braces_on_next_line = false
"#,
    )?;
    let class = Class::new("Tiny")?.with_method(Method::new("run")?.body("work();"))?;
    let code = Printer::new(config).print_class(&class.into(), None)?;
    assert_eq!(code, "class Tiny\n{\n  public function run() {\n    work();\n  }\n}\n");
    Ok(())
}

#[test]
fn test_constant_value_wraps_at_definition_column() -> Result<()> {
    let entries: Array = (1..=6)
        .map(|i| (format!("option_{i}"), format!("value number {i}")))
        .collect();
    let class = Class::new("Options")?
        .with_constant(Constant::new("DEFAULTS", entries)?.visibility(Visibility::Public))?;

    let code = Printer::new(PrinterConfig {
        wrap_length: 60,
        ..PrinterConfig::default()
    })
    .print_class(&class.into(), None)?;
    assert!(code.contains("\tpublic const DEFAULTS = [\n\t\t'option_1' => 'value number 1',\n"));
    assert!(code.contains("\t\t'option_6' => 'value number 6',\n\t];\n"));
    Ok(())
}

#[test]
fn test_closure_and_arrow_function() -> Result<()> {
    let printer = Printer::default();
    let closure = Closure::new()
        .param(Parameter::new("n")?.ty("int"))?
        .capture("step")?
        .returns("int")
        .body("return $n + $step;");

    assert_eq!(
        printer.print_closure(&closure, None)?,
        "function (int $n) use ($step): int {\n\treturn $n + $step;\n}"
    );

    let arrow = closure.clone().body("$n + $step");
    assert_eq!(printer.print_arrow_function(&arrow, None)?, "fn(int $n): int => $n + $step;");
    Ok(())
}
