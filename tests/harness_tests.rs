//! Execution order, fixtures, aggregation, and the overall-result rule,
//! exercised over whole suite/case trees.

use std::cell::RefCell;
use std::rc::Rc;

use crucible::{CaseStatus, ReportConfig, Suite, Test, Value};

type Log = Rc<RefCell<Vec<String>>>;

fn logger(log: &Log, entry: &str) -> Box<dyn FnMut()> {
    let log = Rc::clone(log);
    let entry = entry.to_string();
    Box::new(move || log.borrow_mut().push(entry.clone()))
}

fn add(a: i64, b: i64) -> i64 {
    a + b
}

mod execution_order {
    use super::*;

    #[test]
    fn suites_and_cases_run_in_declaration_order_with_fixtures_around_them() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));

        let mut test = Test::with_fixtures(
            "ordering",
            Some(logger(&log, "test.setup")),
            Some(logger(&log, "test.teardown")),
        );

        let mut first = Suite::with_fixtures(
            "first",
            Some(logger(&log, "first.setup")),
            Some(logger(&log, "first.teardown")),
        );
        {
            let case_log = Rc::clone(&log);
            first.add_case_with(
                "a",
                Box::new(move |_, _| case_log.borrow_mut().push("first.a".into())),
                None,
                Some(logger(&log, "first.a.before")),
                Some(logger(&log, "first.a.after")),
            );
        }
        {
            let log = Rc::clone(&log);
            first.add_case(
                "b",
                Box::new(move |_, _| log.borrow_mut().push("first.b".into())),
            );
        }
        test.add_suite(first);

        let mut second = Suite::new("second");
        {
            let log = Rc::clone(&log);
            second.add_case(
                "c",
                Box::new(move |_, _| log.borrow_mut().push("second.c".into())),
            );
        }
        test.add_suite(second);

        test.run(&ReportConfig::plain());

        assert_eq!(
            *log.borrow(),
            [
                "test.setup",
                "first.setup",
                "first.a.before",
                "first.a",
                "first.a.after",
                "first.b",
                "first.teardown",
                "second.c",
                "test.teardown",
            ]
        );
    }

    #[test]
    fn before_and_after_run_even_when_the_body_fails() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));

        let mut test = Test::new("fixtures on failure");
        let mut suite = Suite::new("s");
        suite.add_case_with(
            "failing",
            Box::new(|ctx, _| ctx.fail("latched")),
            None,
            Some(logger(&log, "before")),
            Some(logger(&log, "after")),
        );
        test.add_suite(suite);

        let outcome = test.run(&ReportConfig::plain());
        assert!(outcome.is_failure());
        assert_eq!(*log.borrow(), ["before", "after"]);
    }

    #[test]
    fn the_opaque_parameter_reaches_the_body() {
        let mut test = Test::new("params");
        let mut suite = Suite::new("s");
        suite.add_case_with(
            "reads its parameter",
            Box::new(|ctx, param| {
                let limit = param
                    .and_then(|p| p.downcast_ref::<i64>())
                    .copied()
                    .unwrap_or(0);
                ctx.int_eq(40, limit - 2);
            }),
            Some(Box::new(42i64)),
            None,
            None,
        );
        test.add_suite(suite);
        assert!(!test.run(&ReportConfig::plain()).is_failure());
    }
}

mod aggregation {
    use super::*;

    fn mixed_tree() -> Test {
        let mut test = Test::new("aggregation");

        let mut clean = Suite::new("clean");
        clean.add_case("p1", Box::new(|ctx, _| ctx.int_eq(1, 1)));
        clean.add_case("p2", Box::new(|ctx, _| ctx.int_eq(2, 2)));
        test.add_suite(clean);

        let mut dirty = Suite::new("dirty");
        dirty.add_case("p", Box::new(|ctx, _| ctx.int_eq(3, 3)));
        dirty.add_case("f1", Box::new(|ctx, _| ctx.int_eq(0, 1)));
        dirty.add_case("f2", Box::new(|ctx, _| ctx.fail("nope")));
        test.add_suite(dirty);

        test
    }

    #[test]
    fn totals_match_the_final_tree_state() {
        let mut test = mixed_tree();
        test.run(&ReportConfig::plain());

        let summary = test.summary();
        assert_eq!(summary.suites, 2);
        assert_eq!(summary.failed_suites, 1);
        assert_eq!(summary.cases, 5);
        assert_eq!(summary.failed_cases, 2);
    }

    #[test]
    fn a_failed_case_increments_its_suite_exactly_once() {
        let mut test = Test::new("one increment");
        let mut suite = Suite::new("s");
        suite.add_case(
            "many failing assertions",
            Box::new(|ctx, _| {
                ctx.int_eq(0, 1);
                ctx.int_eq(0, 2);
                ctx.int_eq(0, 3);
            }),
        );
        test.add_suite(suite);
        test.run(&ReportConfig::plain());
        assert_eq!(test.summary().failed_cases, 1);
    }

    #[test]
    fn the_outcome_is_failure_iff_any_case_failed() {
        let mut green = Test::new("green");
        let mut s = Suite::new("s");
        s.add_case("ok", Box::new(|ctx, _| ctx.is_true(true)));
        green.add_suite(s);
        assert!(!green.run(&ReportConfig::plain()).is_failure());
        assert_eq!(green.outcome().exit_code(), 0);

        let mut red = mixed_tree();
        assert!(red.run(&ReportConfig::plain()).is_failure());
        assert_eq!(red.outcome().exit_code(), 1);
    }

    #[test]
    fn counts_are_stable_across_reruns() {
        let mut test = mixed_tree();
        test.run(&ReportConfig::plain());
        test.run(&ReportConfig::plain());
        assert_eq!(test.summary().failed_cases, 2);
        assert_eq!(test.summary().cases, 5);
    }
}

mod scenarios {
    use super::*;

    #[test]
    fn integer_addition_suite_latches_only_the_bad_case() {
        let mut test = Test::new("calculator");
        let mut suite = Suite::new("addition");
        suite.add_case(
            "zero sum",
            Box::new(|ctx, _| {
                ctx.int_eq(0, add(2, -2));
                ctx.int_ne(1, add(2, -2));
            }),
        );
        suite.add_case("off by one", Box::new(|ctx, _| ctx.int_eq(11, add(2, 8))));
        suite.add_case("still runs", Box::new(|ctx, _| ctx.int_eq(4, add(2, 2))));
        test.add_suite(suite);

        let outcome = test.run(&ReportConfig::plain());
        assert!(outcome.is_failure());

        let suite = test.suites().next().expect("one suite");
        assert_eq!(suite.failed_count(), 1);

        let statuses: Vec<_> = suite.cases().map(|c| c.status().clone()).collect();
        assert_eq!(statuses[0], CaseStatus::Passed);
        assert!(statuses[1].is_failed());
        assert_eq!(statuses[2], CaseStatus::Passed);

        if let CaseStatus::Failed(f) = &statuses[1] {
            assert_eq!(f.reason, "expected<11> : actual<10>");
            assert!(f.site.file.ends_with("harness_tests.rs"));
        }
    }

    #[test]
    fn case_bodies_script_and_consume_mock_values() {
        let mut test = Test::new("mocked io");

        // The "mocked function": reads an output argument and a return value.
        let io = test.mocks();
        let read_port = move |out: &mut i64| -> i64 {
            *out = io.arg("read_port").as_int().expect("Int arg");
            io.retv("read_port").as_int().expect("Int retv")
        };

        let mut suite = Suite::new("driver");
        suite.add_case(
            "first invocation",
            Box::new(move |ctx, _| {
                ctx.mocks().arg_return("read_port", Value::Int(5));
                ctx.mocks().retv_return("read_port", Value::Int(7));
                let mut out = 0;
                let ret = read_port(&mut out);
                ctx.int_eq(7, ret);
                ctx.int_eq(5, out);
            }),
        );
        test.add_suite(suite);

        assert!(!test.run(&ReportConfig::plain()).is_failure());
    }
}
