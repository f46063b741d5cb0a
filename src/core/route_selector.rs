//! 线路选择规则
//!
//! 根据司机 id 从全部线路中挑出要显示的线路，规则按固定顺序叠加：
//! - 存在 id 与司机 id 相同的线路时，先加入该线路
//! - 司机 id 能被 2 整除时，加入第一条 R 类线路
//! - 司机 id 能被 5 整除时，加入第二条 C 类线路
//! - 以上都没有命中时，加入最后一条 I 类线路
//!
//! 结果不去重。缺少所需类型的线路时整个操作失败，不返回部分结果。

use crate::core::models::{Route, RouteType};
use thiserror::Error;

/// 线路选择失败
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteSelectionError {
    /// 没有指定类型的线路
    #[error("没有类型为 {0} 的线路")]
    NoRouteOfType(RouteType),
    /// 指定类型的线路数量不足
    #[error("类型为 {route_type} 的线路只有 {available} 条，至少需要 {required} 条")]
    NotEnoughRoutes {
        route_type: RouteType,
        required: usize,
        available: usize,
    },
}

/// 为司机计算要显示的线路
pub fn select_driver_routes(
    driver_id: i64,
    routes: &[Route],
) -> Result<Vec<Route>, RouteSelectionError> {
    let mut driver_routes = Vec::new();

    let equal_route = routes.iter().find(|r| r.id == driver_id);
    let divisible_by_2 = driver_id % 2 == 0;
    let divisible_by_5 = driver_id % 5 == 0;

    if let Some(route) = equal_route {
        driver_routes.push(route.clone());
    }

    if divisible_by_2 {
        driver_routes.push(first_of_type(routes, RouteType::R)?.clone());
    }

    if divisible_by_5 {
        driver_routes.push(nth_of_type(routes, RouteType::C, 1)?.clone());
    }

    if equal_route.is_none() && !divisible_by_2 && !divisible_by_5 {
        driver_routes.push(last_of_type(routes, RouteType::I)?.clone());
    }

    Ok(driver_routes)
}

fn first_of_type(routes: &[Route], route_type: RouteType) -> Result<&Route, RouteSelectionError> {
    routes
        .iter()
        .find(|r| r.route_type == route_type)
        .ok_or(RouteSelectionError::NoRouteOfType(route_type))
}

fn last_of_type(routes: &[Route], route_type: RouteType) -> Result<&Route, RouteSelectionError> {
    routes
        .iter()
        .rev()
        .find(|r| r.route_type == route_type)
        .ok_or(RouteSelectionError::NoRouteOfType(route_type))
}

/// 按原顺序取第 index 条（从 0 开始）指定类型的线路
fn nth_of_type(
    routes: &[Route],
    route_type: RouteType,
    index: usize,
) -> Result<&Route, RouteSelectionError> {
    let mut matching = routes.iter().filter(|r| r.route_type == route_type);
    match matching.nth(index) {
        Some(route) => Ok(route),
        None => Err(RouteSelectionError::NotEnoughRoutes {
            route_type,
            required: index + 1,
            available: routes.iter().filter(|r| r.route_type == route_type).count(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(id: i64, route_type: RouteType, name: &str) -> Route {
        Route {
            id,
            route_type,
            name: name.to_string(),
        }
    }

    fn ids(routes: &[Route]) -> Vec<i64> {
        routes.iter().map(|r| r.id).collect()
    }

    /// 每种规则都能命中的线路集合
    fn full_set() -> Vec<Route> {
        vec![
            route(1, RouteType::C, "C-1"),
            route(2, RouteType::R, "R-2"),
            route(3, RouteType::I, "I-3"),
            route(4, RouteType::C, "C-4"),
            route(6, RouteType::R, "R-6"),
            route(7, RouteType::I, "I-7"),
            route(8, RouteType::C, "C-8"),
        ]
    }

    #[test]
    fn test_even_and_divisible_by_5_without_equal_route() {
        let routes = vec![
            route(1, RouteType::C, "A"),
            route(2, RouteType::R, "B"),
            route(3, RouteType::C, "D"),
            route(4, RouteType::R, "E"),
        ];

        let result = select_driver_routes(10, &routes).unwrap();
        assert_eq!(
            result,
            vec![route(2, RouteType::R, "B"), route(3, RouteType::C, "D")]
        );
    }

    #[test]
    fn test_odd_not_divisible_by_5_without_equal_route_takes_last_i() {
        let routes = full_set();
        for driver_id in [9, 11, 13, 21, 99] {
            let result = select_driver_routes(driver_id, &routes).unwrap();
            assert_eq!(ids(&result), vec![7], "driver {driver_id}");
        }
    }

    #[test]
    fn test_even_not_divisible_by_5_without_equal_route_takes_first_r() {
        let routes = full_set();
        for driver_id in [12, 14, 16, 22] {
            let result = select_driver_routes(driver_id, &routes).unwrap();
            assert_eq!(ids(&result), vec![2], "driver {driver_id}");
        }
    }

    #[test]
    fn test_odd_divisible_by_5_takes_second_c() {
        let routes = full_set();
        let result = select_driver_routes(15, &routes).unwrap();
        assert_eq!(ids(&result), vec![4]);
    }

    #[test]
    fn test_equal_route_alone_for_odd_id() {
        let routes = full_set();
        // 7 是奇数、不能被 5 整除，但有同 id 线路，所以不再取最后一条 I
        let result = select_driver_routes(7, &routes).unwrap();
        assert_eq!(ids(&result), vec![7]);

        let result = select_driver_routes(3, &routes).unwrap();
        assert_eq!(ids(&result), vec![3]);
    }

    #[test]
    fn test_divisible_by_10_with_equal_route_keeps_order() {
        let mut routes = full_set();
        routes.push(route(10, RouteType::I, "I-10"));

        let result = select_driver_routes(10, &routes).unwrap();
        assert_eq!(ids(&result), vec![10, 2, 4]);
    }

    #[test]
    fn test_no_deduplication() {
        let routes = full_set();
        // 线路 2 既是同 id 线路，也是第一条 R 线路
        let result = select_driver_routes(2, &routes).unwrap();
        assert_eq!(ids(&result), vec![2, 2]);
    }

    #[test]
    fn test_empty_routes_with_even_id_fails() {
        let err = select_driver_routes(4, &[]).unwrap_err();
        assert_eq!(err, RouteSelectionError::NoRouteOfType(RouteType::R));
    }

    #[test]
    fn test_missing_i_route_fails() {
        let routes = vec![route(2, RouteType::R, "R"), route(4, RouteType::C, "C")];
        let err = select_driver_routes(1, &routes).unwrap_err();
        assert_eq!(err, RouteSelectionError::NoRouteOfType(RouteType::I));
    }

    #[test]
    fn test_single_c_route_fails_for_divisible_by_5() {
        let routes = vec![
            route(1, RouteType::C, "C"),
            route(2, RouteType::R, "R"),
            route(3, RouteType::I, "I"),
        ];
        let err = select_driver_routes(5, &routes).unwrap_err();
        assert_eq!(
            err,
            RouteSelectionError::NotEnoughRoutes {
                route_type: RouteType::C,
                required: 2,
                available: 1,
            }
        );
    }

    #[test]
    fn test_first_failure_wins_for_divisible_by_10() {
        // 没有 R 线路时，先报 R 缺失
        let routes = vec![route(1, RouteType::C, "C")];
        let err = select_driver_routes(20, &routes).unwrap_err();
        assert_eq!(err, RouteSelectionError::NoRouteOfType(RouteType::R));
    }

    #[test]
    fn test_result_is_rebuilt_each_call() {
        let routes = full_set();
        let first = select_driver_routes(10, &routes).unwrap();
        let second = select_driver_routes(10, &routes).unwrap();
        assert_eq!(first, second);
        assert_eq!(ids(&first), vec![2, 4]);
    }
}
